//! `标签 : 值` 形式的行解析

/// 在某一行中查找字段的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// 没有任何一行包含该标签
    Absent,
    /// 找到标签并取出了值
    Value(String),
    /// 找到标签，但该行无法取出值
    Malformed,
}

const DELIMITER: char = ':';

/// 标签是否作为独立的词出现在行中（"SSID" 不会匹配 "BSSID"）
fn line_has_label(line: &str, label: &str) -> bool {
    if label.is_empty() {
        return false;
    }

    line.match_indices(label).any(|(start, _)| {
        line[..start]
            .chars()
            .next_back()
            .is_none_or(|prev| !prev.is_alphanumeric())
    })
}

fn line_matches<S: AsRef<str>>(line: &str, labels: &[S]) -> bool {
    labels.iter().any(|label| line_has_label(line, label.as_ref()))
}

/// 去掉值两侧的空白、回车以及一对包裹的引号
pub fn clean_value(raw: &str) -> &str {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c.is_control());

    for (open, close) in [('"', '"'), ('“', '”')] {
        if let Some(inner) = trimmed
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner;
        }
    }

    trimmed
}

/// 从单行中取出分隔符之后的值
fn value_of(line: &str) -> Field {
    match line.split_once(DELIMITER) {
        Some((_, raw)) => {
            let value = clean_value(raw);
            if value.is_empty() {
                Field::Malformed
            } else {
                Field::Value(value.to_string())
            }
        }
        None => Field::Malformed,
    }
}

/// 取出密码原文：只去掉分隔符后的一个空格和行尾换行，
/// 密码本身首尾的空格和引号保持不变
fn secret_of(line: &str) -> Field {
    match line.split_once(DELIMITER) {
        Some((_, raw)) => {
            let raw = raw.trim_end_matches(['\r', '\n']);
            let value = raw.strip_prefix(' ').unwrap_or(raw);
            if value.is_empty() {
                Field::Malformed
            } else {
                Field::Value(value.to_string())
            }
        }
        None => Field::Malformed,
    }
}

fn first_match<'a, L, S>(lines: &'a [L], labels: &[S]) -> Option<&'a str>
where
    L: AsRef<str>,
    S: AsRef<str>,
{
    lines
        .iter()
        .map(AsRef::as_ref)
        .find(|line| line_matches(line, labels))
}

/// 按顺序扫描各行，返回第一条包含任一标签的行的解析结果
pub fn find_field<L, S>(lines: &[L], labels: &[S]) -> Field
where
    L: AsRef<str>,
    S: AsRef<str>,
{
    first_match(lines, labels).map_or(Field::Absent, value_of)
}

/// 与 [`find_field`] 相同，但值按密码原文取出
pub fn find_secret_field<L, S>(lines: &[L], labels: &[S]) -> Field
where
    L: AsRef<str>,
    S: AsRef<str>,
{
    first_match(lines, labels).map_or(Field::Absent, secret_of)
}

/// 取出第一条匹配行的值
pub fn extract_field<L, S>(lines: &[L], labels: &[S]) -> Option<String>
where
    L: AsRef<str>,
    S: AsRef<str>,
{
    match find_field(lines, labels) {
        Field::Value(value) => Some(value),
        Field::Absent | Field::Malformed => None,
    }
}

/// 取出所有匹配行的值，保持原有顺序，无法解析的行被跳过
pub fn extract_all<L, S>(lines: &[L], labels: &[S]) -> Vec<String>
where
    L: AsRef<str>,
    S: AsRef<str>,
{
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| line_matches(line, labels))
        .filter_map(|line| match value_of(line) {
            Field::Value(value) => Some(value),
            _ => {
                log::debug!("Skipping malformed line: {:?}", line);
                None
            }
        })
        .collect()
}

/// 把文本切分成行（兼容 `\r\n`）
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}
