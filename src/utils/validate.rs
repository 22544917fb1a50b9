use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Result, TrackerError};

static ATTACHMENT_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^\s/?#]+[^\s]*$").expect("Invalid attachment url regex")
});

/// 必填字段：缺失或去除首尾空白后为空都视为未填写，返回去除空白后的值
pub fn require_field(value: Option<&str>, field: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(TrackerError::validation_failed(format!("{field} 为必填字段"))),
    }
}

/// 更新时提供的字段不能为空
pub fn non_blank(value: Option<&str>, field: &str) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => require_field(Some(v), field).map(Some),
    }
}

pub fn validate_max_score(score: f64) -> Result<f64> {
    if !score.is_finite() || score <= 0.0 {
        return Err(TrackerError::validation_failed("满分必须为正数"));
    }
    Ok(score)
}

pub fn validate_attachments(urls: &[String]) -> Result<Vec<String>> {
    urls.iter()
        .map(|url| {
            let url = url.trim();
            if ATTACHMENT_URL_RE.is_match(url) {
                Ok(url.to_string())
            } else {
                Err(TrackerError::validation_failed(format!(
                    "附件链接格式不正确: {url}"
                )))
            }
        })
        .collect()
}
