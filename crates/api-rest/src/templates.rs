//! Kiosk page templates.
//!
//! Templates are compiled into the binary and parsed once when the application state is built.

use tera::{Context, Tera};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("welcome.html", include_str!("../templates/welcome.html")),
    ("portal.html", include_str!("../templates/portal.html")),
    ("document.html", include_str!("../templates/document.html")),
    ("completed.html", include_str!("../templates/completed.html")),
];

/// Parse every page template.
pub fn load() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES.iter().copied())?;
    Ok(tera)
}

/// Render `name` with `context`.
pub fn render(tera: &Tera, name: &str, context: &Context) -> tera::Result<String> {
    tera.render(name, context)
}
