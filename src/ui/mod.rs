use egui::Color32;

use trackscope::map::MarkerColor;

pub(crate) mod plot_display;
pub(crate) mod track_view;

pub(crate) const PALETTE_TRACK: Color32 = Color32::from_rgb(0x1e, 0x5a, 0xd6);
pub(crate) const PALETTE_SELECTION: Color32 = Color32::from_rgb(0x00, 0x3c, 0xff);
pub(crate) const PALETTE_DETAIL: Color32 = Color32::from_rgb(0xe0, 0x1b, 0x24);

pub(crate) fn marker_color(color: MarkerColor) -> Color32 {
    match color {
        MarkerColor::Blue => PALETTE_SELECTION,
        MarkerColor::Red => PALETTE_DETAIL,
    }
}
