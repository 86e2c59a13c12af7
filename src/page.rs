use askama::Template;

/// Static part of the operator page, fixed at startup from the settings.
pub struct PanelLayout {
    title: String,
    compressors: Vec<String>,
}

/// One render of `templates/index.html`; every value is HTML-escaped.
#[derive(Template)]
#[template(path = "index.html")]
pub struct StatusPage<'a> {
    pub title: &'a str,
    pub compressors: &'a [String],
    pub pressure: &'a str,
}

impl PanelLayout {
    pub fn new(title: &str, compressors: Vec<String>) -> PanelLayout {
        PanelLayout {
            title: title.to_owned(),
            compressors: compressors,
        }
    }

    pub fn page<'a>(&'a self, pressure: &'a str) -> StatusPage<'a> {
        StatusPage {
            title: &self.title,
            compressors: &self.compressors,
            pressure: pressure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> PanelLayout {
        PanelLayout::new("Painel", vec!["1".to_owned(), "2".to_owned()])
    }

    #[test]
    fn embeds_pressure_value() {
        let html = layout().page("42.5").render().unwrap();
        assert!(html.contains("<span id=\"pressure\" class=\"pressure\">42.5</span>"));
    }

    #[test]
    fn renders_one_control_pair_per_compressor() {
        let html = layout().page("0.0").render().unwrap();
        assert!(html.contains("data-compressor=\"1\" data-state=\"on\""));
        assert!(html.contains("data-compressor=\"2\" data-state=\"off\""));
        assert_eq!(html.matches("class=\"compressor\"").count(), 2);
    }

    #[test]
    fn markup_in_values_is_escaped() {
        let layout = PanelLayout::new("A & B", vec!["\"x\"".to_owned()]);
        let html = layout.page("<b>9</b>").render().unwrap();
        assert!(html.contains("&lt;b&gt;9&lt;/b&gt;"));
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("data-compressor=\"&quot;x&quot;\""));
        assert!(!html.contains("<b>9</b>"));
    }

    #[test]
    fn placeholder_text_in_values_is_not_expanded() {
        let layout = PanelLayout::new("{{pressure}}", vec!["{{pressure}}".to_owned()]);
        let html = layout.page("7.5").render().unwrap();
        assert!(html.contains("<title>{{pressure}}</title>"));
        assert!(html.contains("data-compressor=\"{{pressure}}\" data-state=\"on\""));
        assert!(!html.contains("data-compressor=\"7.5\""));
    }
}
