use serde::{Deserialize, Serialize};

/// A target platform listed in support matrices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Identifier used in `@supported` tags (e.g. `weapp`).
    pub name: String,
    /// Column label in the rendered support table.
    pub label: String,
}

impl Platform {
    /// Creates a platform from its identifier and display label.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// Platforms in support-matrix column order.
pub const DEFAULT_PLATFORMS: [(&str, &str); 8] = [
    ("weapp", "微信小程序"),
    ("swan", "百度小程序"),
    ("alipay", "支付宝小程序"),
    ("tt", "字节跳动小程序"),
    ("qq", "QQ 小程序"),
    ("h5", "H5"),
    ("rn", "React Native"),
    ("quickapp", "快应用"),
];

/// Owned copy of [`DEFAULT_PLATFORMS`].
pub fn default_platforms() -> Vec<Platform> {
    DEFAULT_PLATFORMS
        .iter()
        .map(|(name, label)| Platform::new(*name, *label))
        .collect()
}
