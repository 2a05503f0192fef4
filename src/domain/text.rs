//! 文本预处理
//!
//! 合成前的文本规范化与不支持字符剔除
//!
//! macOS 输入法产生的韩文往往是 NFD（分解形）的，
//! 引擎只接受 NFC（组合形），因此统一先做 NFC 规范化

use unicode_normalization::{is_nfc, UnicodeNormalization};

/// 将文本规范化为 NFC（组合形）
///
/// 已经是 NFC 的文本直接返回，避免不必要的分配
pub fn normalize_nfc(text: &str) -> String {
    if is_nfc(text) {
        text.to_string()
    } else {
        text.nfc().collect()
    }
}

/// 剔除引擎报告的不支持字符
///
/// `chars` 中的每一项是引擎错误消息里报告的单个字符
/// （以字符串形式传递，容忍多字节字符）
pub fn strip_characters(text: &str, chars: &[String]) -> String {
    let mut result = text.to_string();
    for ch in chars {
        if ch.is_empty() {
            continue;
        }
        result = result.replace(ch.as_str(), "");
    }
    result
}

/// 判断剔除后的文本是否已无可合成内容
pub fn is_effectively_empty(text: &str) -> bool {
    text.trim().is_empty()
}
