//! Prompt templates.
//!
//! Both script templates mandate the same output contract: first line is a
//! short `**title**`, everything is Vietnamese, and every content line is
//! prefixed with a `[MM:SS]` or `[HH:MM:SS]` timestamp.

use athena_models::ScriptMode;

const TRANSCRIPT_PROMPT: &str = r#"Hãy nghe video này, trích xuất toàn bộ lời thoại và DỊCH SANG TIẾNG VIỆT chuẩn xác.

YÊU CẦU:
1. Ở DÒNG ĐẦU TIÊN, viết một TIÊU ĐỀ ngắn gọn, hấp dẫn tóm tắt toàn bộ nội dung video (định dạng: **TIÊU ĐỀ**)
2. Chỉ xuất ra TIẾNG VIỆT, KHÔNG cần ghi lại ngôn ngữ gốc
3. Mỗi đoạn lời thoại phải có định dạng thời gian ở đầu dòng theo format: [MM:SS] hoặc [HH:MM:SS]
4. Chỉ ghi lại nội dung lời nói đã dịch sang tiếng Việt, không mô tả hình ảnh

Ví dụ format:
**Tiêu đề tóm tắt nội dung video**

[00:05] Lời thoại đầu tiên đã dịch sang tiếng Việt...
[00:12] Lời thoại tiếp theo đã dịch sang tiếng Việt...
[01:30] Lời thoại sau đó đã dịch sang tiếng Việt..."#;

const DETAILED_PROMPT: &str = r#"Xem video này và viết kịch bản tiếng Việt chi tiết (Mô tả bối cảnh + Lời thoại).

YÊU CẦU:
1. Ở DÒNG ĐẦU TIÊN, viết một TIÊU ĐỀ ngắn gọn, hấp dẫn tóm tắt toàn bộ nội dung video (định dạng: **TIÊU ĐỀ**)
2. Chỉ xuất ra TIẾNG VIỆT, KHÔNG cần ghi lại ngôn ngữ gốc
3. Mỗi đoạn phải có định dạng thời gian ở đầu dòng theo format: [MM:SS] hoặc [HH:MM:SS]
4. Viết hấp dẫn, chia đoạn rõ ràng với timestamps cho mỗi đoạn

Ví dụ format:
**Tiêu đề tóm tắt nội dung video**

[00:05] [Bối cảnh] Mô tả cảnh bằng tiếng Việt...
[00:08] [Lời thoại] Nội dung lời nói đã dịch sang tiếng Việt..."#;

/// Select the script template for a mode.
pub fn script_prompt(mode: ScriptMode) -> &'static str {
    match mode {
        ScriptMode::Transcript => TRANSCRIPT_PROMPT,
        ScriptMode::Detailed => DETAILED_PROMPT,
    }
}

/// Build the translation prompt: content is translated, structure and
/// timestamps are preserved verbatim.
pub fn translate_prompt(text: &str, target_language: &str, language_name: &str) -> String {
    format!(
        "Hãy dịch toàn bộ nội dung sau sang {language_name} ({target_language}). \
         Giữ nguyên định dạng, cấu trúc và dấu thời gian (nếu có). \
         Chỉ dịch nội dung, không thêm giải thích:\n\n{text}"
    )
}
