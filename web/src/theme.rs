use scape_core::Theme;

pub(crate) const ATTR_NAME: &str = "data-theme";

/// Mirrors the session theme onto the `<html>` element.
pub(crate) fn apply(theme: Theme) {
    use gloo::utils::document;

    let Some(html) = document().document_element() else {
        log::error!("document has no html element");
        return;
    };
    let scheme = theme.scheme();
    log::debug!("theme-scheme: {}", scheme);
    if let Err(err) = html.set_attribute(ATTR_NAME, scheme) {
        log::error!("failed to set theme: {:?}", err);
    }
}

pub(crate) const fn label(theme: Theme) -> &'static str {
    use Theme::*;
    match theme {
        Default => "Default",
        BlueGreen => "Blue & green",
        Grayscale => "Grayscale",
    }
}
