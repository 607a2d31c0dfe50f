//! 外部工具输出的解码
//!
//! netsh 的输出编码取决于系统设置：可能是 UTF-8，也可能是本地代码页（简体中文系统上是 GBK）。
//! 先按 UTF-8 解码，结果里找不到任何标记文本或者出现替换字符时，改用备用编码。

use encoding_rs::{Encoding, GBK};

use crate::error::{Result, WifiError};

/// 解码器
#[derive(Debug, Clone)]
pub struct TextDecoder {
    markers: Vec<String>,
    fallback: &'static Encoding,
}

impl TextDecoder {
    /// 使用给定的标记文本和 GBK 备用编码创建解码器
    pub fn new(markers: Vec<String>) -> Self {
        Self {
            markers,
            fallback: GBK,
        }
    }

    /// 按 WHATWG 编码名称设置备用编码，例如 `gbk`、`gb18030`、`big5`
    pub fn with_fallback_label(mut self, label: &str) -> Result<Self> {
        self.fallback = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
            WifiError::ConfigParse(format!("unknown text encoding '{}'", label))
        })?;
        Ok(self)
    }

    /// 备用编码名称
    pub fn fallback_name(&self) -> &'static str {
        self.fallback.name()
    }

    fn has_marker(&self, text: &str) -> bool {
        self.markers.iter().any(|m| text.contains(m.as_str()))
    }

    /// 解码字节流，永不失败；无法识别的字节会被替换
    pub fn decode(&self, bytes: &[u8]) -> String {
        let primary = String::from_utf8_lossy(bytes);
        if self.has_marker(&primary) && !primary.contains(char::REPLACEMENT_CHARACTER) {
            return primary.into_owned();
        }

        let (fallback, _, had_errors) = self.fallback.decode(bytes);
        if had_errors {
            log::debug!("Output is not clean {} either", self.fallback.name());
        }
        fallback.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::Labels;

    fn decoder() -> TextDecoder {
        TextDecoder::new(Labels::default().decode_markers)
    }

    fn gbk(text: &str) -> Vec<u8> {
        let (bytes, _, had_errors) = GBK.encode(text);
        assert!(!had_errors);
        bytes.into_owned()
    }

    #[test]
    fn test_utf8_output_kept() {
        let text = "用户配置文件\n    所有用户配置文件 : 家里的WiFi\r\n";
        assert_eq!(decoder().decode(text.as_bytes()), text);
    }

    #[test]
    fn test_english_output_kept() {
        let text = "User profiles\n    All User Profile     : Home\r\n";
        assert_eq!(decoder().decode(text.as_bytes()), text);
    }

    #[test]
    fn test_gbk_output_falls_back() {
        let text = "用户配置文件\n    所有用户配置文件 : 家里的WiFi\r\n";
        let bytes = gbk(text);

        let primary = String::from_utf8_lossy(&bytes);
        assert!(!primary.contains("配置文件"));

        let decoded = decoder().decode(&bytes);
        assert!(decoded.contains("配置文件"));
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_marker_present_but_name_is_gbk() {
        // 英文标签 + GBK 编码的中文名称
        let mut bytes = b"    All User Profile     : ".to_vec();
        bytes.extend(gbk("办公室"));
        assert_eq!(decoder().decode(&bytes), "    All User Profile     : 办公室");
    }

    #[test]
    fn test_garbage_never_panics() {
        let decoded = decoder().decode(&[0xff, 0xfe, 0x00, 0x81]);
        assert!(!decoded.is_empty());
    }

    #[test]
    fn test_fallback_label() {
        let decoder = decoder().with_fallback_label("big5").expect("big5 is a known label");
        assert_eq!(decoder.fallback_name(), "Big5");
        assert!(TextDecoder::new(Vec::new()).with_fallback_label("klingon").is_err());
    }
}
