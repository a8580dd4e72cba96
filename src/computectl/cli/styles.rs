use console::Style;
use once_cell::sync::Lazy;

pub struct Styles {
    pub header: Style,
    pub property: Style,
    pub success: Style,
    pub info: Style,
    pub warning: Style,
}

pub static STYLES: Lazy<Styles> = Lazy::new(|| Styles {
    header: Style::new().bold().underlined(),
    property: Style::new().cyan(),
    success: Style::new().green(),
    info: Style::new().dim(),
    warning: Style::new().yellow(),
});
