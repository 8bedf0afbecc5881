//! Starter configuration files written by `paperfeed init`.
//!
//! The bundled templates are complete TOML documents. They are emitted with every
//! setting commented out so a fresh file changes nothing until the user opts in.

/// Project configuration template.
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template.
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the project template with all settings disabled.
pub fn local_template() -> String {
    disable_settings(LOCAL_TEMPLATE)
}

/// Returns the global template with all settings disabled.
pub fn global_template() -> String {
    disable_settings(GLOBAL_TEMPLATE)
}

/// Prefixes every setting and section line with `# `.
///
/// Blank lines and lines that are already comments pass through untouched.
fn disable_settings(template: &str) -> String {
    template
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                line.to_string()
            } else {
                format!("# {line}")
            }
        })
        .fold(String::with_capacity(template.len() * 2), |mut out, line| {
            out.push_str(&line);
            out.push('\n');
            out
        })
}
