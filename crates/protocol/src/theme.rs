use crate::settings::ColorScheme;

/// CSS custom properties consumed by the stylesheet, in slot order.
///
/// The order is load-bearing: variable N is always fed from `colorN`, and
/// both the panel's color pickers and the live theme are applied in this
/// sequence.
pub const THEME_VARIABLES: [&str; 11] = [
    "--body",
    "--sidebar-main",
    "--sidebar-secondary",
    "--main-font-color",
    "--secondary-font-color",
    "--section-title-color",
    "--section-border-color",
    "--menu-bar-border",
    "--status-font-color",
    "--message-box",
    "--save-settings-button-border",
];

/// Pairs each theme variable with its color value, slot 1 first.
pub fn theme_pairs(scheme: &ColorScheme) -> impl Iterator<Item = (&'static str, &str)> {
    THEME_VARIABLES.into_iter().zip(scheme.values())
}
