//! Collision-free artifact naming.
//!
//! Concurrent requests each get their own scratch file; a uuid suffix keeps
//! two requests started in the same instant from colliding on a name.

use uuid::Uuid;

/// Generate a unique local filename for a downloaded video.
pub fn unique_video_filename() -> String {
    format!("video_{}.mp4", Uuid::new_v4().simple())
}
