// SPDX-License-Identifier: MPL-2.0
//! Markup of a decorated slot text block.

use crate::config::SlotDefaults;
use crate::domain::slot::SlotConfig;

use super::controls::{ControlAttributes, ControlLabels, PlaybackControl};

const PLAY_ICON_PATH: &str = "/federal/assets/svgs/accessibility-play.svg";
const PAUSE_ICON_PATH: &str = "/federal/assets/svgs/accessibility-pause.svg";

/// Play/pause control as first rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlMarkup {
    pub attributes: ControlAttributes,
    pub play_icon_alt: String,
    pub pause_icon_alt: String,
    pub play_icon_src: String,
    pub pause_icon_src: String,
}

/// View model of the decorated block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotMarkup {
    /// Accessible name of the `role="group"` container.
    pub aria_label: String,
    pub prefix: Option<String>,
    pub prefix_color: String,
    pub items: Vec<String>,
    pub slot_color: String,
    pub control: Option<ControlMarkup>,
}

impl SlotMarkup {
    /// Builds the markup for a block.
    ///
    /// `icon_root` is the origin serving the shared control icons.
    #[must_use]
    pub fn build(
        config: &SlotConfig,
        defaults: &SlotDefaults,
        reduced_motion: bool,
        labels: &ControlLabels,
        icon_root: &str,
    ) -> Self {
        let items = config.effective_items(reduced_motion);
        let spoken: Vec<String> = items.iter().map(|item| item.replace('.', "")).collect();
        let aria_label = [config.prefix.clone(), spoken.join(", ")]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let control = (!reduced_motion && !items.is_empty()).then(|| ControlMarkup {
            attributes: PlaybackControl::new(labels.clone()).attributes(),
            play_icon_alt: labels.play_icon.clone(),
            pause_icon_alt: labels.pause_icon.clone(),
            play_icon_src: format!("{icon_root}{PLAY_ICON_PATH}"),
            pause_icon_src: format!("{icon_root}{PAUSE_ICON_PATH}"),
        });

        Self {
            aria_label,
            prefix: (!config.prefix.is_empty()).then(|| config.prefix.clone()),
            prefix_color: config
                .prefix_color
                .clone()
                .filter(|color| !color.is_empty())
                .unwrap_or_else(|| defaults.prefix_color.clone()),
            items,
            slot_color: config
                .slot_color
                .clone()
                .filter(|color| !color.is_empty())
                .unwrap_or_else(|| defaults.slot_color.clone()),
            control,
        }
    }

    /// Renders the block contents.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str(&format!(
            "<div class=\"foreground\" role=\"group\" aria-label=\"{}\"><div>",
            escape(&self.aria_label)
        ));
        if let Some(prefix) = &self.prefix {
            html.push_str(&format!(
                "<span class=\"slot-static-text\" aria-hidden=\"true\" style=\"color: {}\">{}</span>",
                escape(&self.prefix_color),
                escape(prefix)
            ));
        }
        if !self.items.is_empty() {
            html.push_str(
                "<span class=\"slot-machine-window\" aria-hidden=\"true\"><span class=\"slot-reel\">",
            );
            for item in &self.items {
                html.push_str(&format!(
                    "<div class=\"slot-item\" style=\"color: {}\">{}</div>",
                    escape(&self.slot_color),
                    escape(item)
                ));
            }
            html.push_str("</span></span>");
        }
        html.push_str("</div></div>");

        if let Some(control) = &self.control {
            control.write_html(&mut html);
        }
        html
    }
}

impl ControlMarkup {
    fn write_html(&self, html: &mut String) {
        let attrs = &self.attributes;
        html.push_str(&format!(
            "<div class=\"animation-controls\"><a class=\"pause-play-wrapper\" title=\"{}\" \
             aria-label=\"{}\" role=\"button\" tabindex=\"0\" aria-pressed=\"{}\">\
             <div class=\"offset-filler{}\">\
             <img class=\"accessibility-control play-icon\" alt=\"{}\" src=\"{}\">\
             <img class=\"accessibility-control pause-icon\" alt=\"{}\" src=\"{}\">\
             </div></a></div>",
            escape(&attrs.title),
            escape(&attrs.aria_label),
            attrs.aria_pressed,
            if attrs.is_playing { " is-playing" } else { "" },
            escape(&self.play_icon_alt),
            escape(&self.play_icon_src),
            escape(&self.pause_icon_alt),
            escape(&self.pause_icon_src),
        ));
    }
}

/// Escapes text for use in element content and quoted attributes.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SlotConfig {
        SlotConfig {
            prefix: "Create".into(),
            items: vec!["faster.".into(), "together".into(), "anything.".into()],
            slot_color: Some("#0a0".into()),
            ..SlotConfig::default()
        }
    }

    fn build(config: &SlotConfig, reduced_motion: bool) -> SlotMarkup {
        SlotMarkup::build(
            config,
            &SlotDefaults::default(),
            reduced_motion,
            &ControlLabels::default(),
            "https://www.adobe.com",
        )
    }

    #[test]
    fn aria_label_joins_prefix_and_items_without_periods() {
        let markup = build(&config(), false);
        assert_eq!(markup.aria_label, "Create faster, together, anything");
    }

    #[test]
    fn reduced_motion_html_is_exact() {
        let html = build(&config(), true).to_html();
        assert_eq!(
            html,
            "<div class=\"foreground\" role=\"group\" aria-label=\"Create anything\"><div>\
             <span class=\"slot-static-text\" aria-hidden=\"true\" style=\"color: #000000\">Create</span>\
             <span class=\"slot-machine-window\" aria-hidden=\"true\"><span class=\"slot-reel\">\
             <div class=\"slot-item\" style=\"color: #0a0\">anything.</div>\
             </span></span></div></div>"
        );
    }

    #[test]
    fn colors_fall_back_to_defaults() {
        let markup = build(&config(), false);
        assert_eq!(markup.prefix_color, "#000000");
        assert_eq!(markup.slot_color, "#0a0");
    }

    #[test]
    fn reduced_motion_keeps_last_item_and_drops_control() {
        let markup = build(&config(), true);
        assert_eq!(markup.items, vec!["anything.".to_string()]);
        assert_eq!(markup.aria_label, "Create anything");
        assert!(markup.control.is_none());
        assert!(!markup.to_html().contains("animation-controls"));
    }

    #[test]
    fn html_has_group_reel_and_control() {
        let html = build(&config(), false).to_html();
        assert!(html.contains("role=\"group\""));
        assert!(html.contains("aria-label=\"Create faster, together, anything\""));
        assert_eq!(html.matches("class=\"slot-item\"").count(), 3);
        assert!(html.contains("aria-pressed=\"true\""));
        assert!(html.contains("offset-filler is-playing"));
        assert!(html.contains(
            "src=\"https://www.adobe.com/federal/assets/svgs/accessibility-pause.svg\""
        ));
    }

    #[test]
    fn authored_text_is_escaped() {
        let config = SlotConfig {
            prefix: "<b>Hi</b>".into(),
            items: vec!["a & b".into()],
            ..SlotConfig::default()
        };
        let html = build(&config, false).to_html();
        assert!(html.contains("&lt;b&gt;Hi&lt;/b&gt;"));
        assert!(html.contains(">a &amp; b</div>"));
    }

    #[test]
    fn empty_block_has_no_reel_or_control() {
        let markup = build(&SlotConfig::default(), false);
        assert_eq!(markup.aria_label, "");
        assert!(markup.control.is_none());
        assert!(!markup.to_html().contains("slot-reel"));
    }
}
