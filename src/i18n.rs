// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持西班牙语（默认）、英文、中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 3] = ["es", "en", "zh-CN"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"es" / "en" / "zh-CN"）,不支持的代码回退到 "es"
pub fn set_locale(locale: &str) {
    let trimmed = locale.trim();
    if SUPPORTED_LOCALES.contains(&trimmed) {
        rust_i18n::set_locale(trimmed);
    } else {
        tracing::warn!("不支持的语言: {}，回退到 es", trimmed);
        rust_i18n::set_locale("es");
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use sales_dashboard::i18n::t;
/// let msg = t("cli.title");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use sales_dashboard::i18n::t_with_args;
/// let msg = t_with_args("error.fetch_failed", &[("reason", "timeout")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
