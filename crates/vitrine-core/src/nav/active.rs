//! Active section lookup

use crate::config::NavConfig;

use super::{ActiveLink, SectionBounds};

/// Pick the link to mark for scroll offset `scroll_y`
///
/// A section is current when `scroll_y` lies in
/// `[top - navbar_height - lead, top - navbar_height - lead + height)`.
/// Offsets under the home threshold, and offsets no section covers, select
/// the home link. The first matching section wins when ranges overlap.
pub fn active_link(
    scroll_y: f64,
    navbar_height: f64,
    sections: &[SectionBounds],
    config: &NavConfig,
) -> ActiveLink {
    if scroll_y < config.home_threshold_px {
        return ActiveLink::Home;
    }

    sections
        .iter()
        .filter(|s| !s.id.is_empty())
        .find(|s| {
            let start = s.top - navbar_height - config.section_offset_px;
            scroll_y >= start && scroll_y < start + s.height
        })
        .map(|s| {
            if s.id == config.home_id {
                ActiveLink::Home
            } else {
                ActiveLink::Section(s.id.clone())
            }
        })
        .unwrap_or(ActiveLink::Home)
}
