//! Static text.

use crate::panel::PanelState;
use crate::slider::width_option;
use crate::widget::{Widget, WidgetCore};
use log::debug;
use panelkit_core::{Canvas, Params, Size};
use std::any::Any;
use std::rc::Rc;

/// A block of text drawn from its cached name image.
///
/// Options: `width` (full panel row), `height` (the wrapped text's height).
#[derive(Debug)]
pub struct Label {
    core: WidgetCore,
}

impl Label {
    /// Build a label at the panel's insertion cursor.
    #[must_use]
    pub fn new(panel: &Rc<PanelState>, name: &str, params: &Params) -> Self {
        let mut core = WidgetCore::new(panel, name, params);
        let width = width_option(params, panel.theme().default_slider_width());
        core.set_size(Size::new(width, 0.0));
        core.render_name();
        let text_height = core.name_image().map_or(0.0, |image| image.size.height);
        let height = params.get_i32_opt("height").map_or(text_height, |h| h as f32);
        core.set_size(Size::new(width, height));
        core.place();
        debug!("created label {name:?}");
        Self { core }
    }
}

impl Widget for Label {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        self.core.draw_label(canvas);
    }

    fn update(&mut self) {}

    fn is_interactive(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
