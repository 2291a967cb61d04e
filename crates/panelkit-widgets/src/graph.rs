//! Rolling time-series display.

use crate::panel::PanelState;
use crate::slider::width_option;
use crate::widget::{Widget, WidgetCore};
use log::{debug, warn};
use panelkit_core::{lmap, Binding, Canvas, Params, Point, Size};
use std::any::Any;
use std::collections::VecDeque;
use std::rc::Rc;

/// Line graph of the most recent samples of a bound value.
///
/// Each [`Widget::update`] appends one sample; once `capacity` samples are
/// held the oldest is evicted. The graph takes no input.
///
/// Options: `min` (0), `max` (1), `width` (compact), `capacity` (128, at
/// most [`MovingGraph::MAX_CAPACITY`]).
#[derive(Debug)]
pub struct MovingGraph {
    core: WidgetCore,
    value: Binding<f32>,
    min: f32,
    max: f32,
    capacity: usize,
    samples: VecDeque<f32>,
}

impl MovingGraph {
    /// Default number of retained samples.
    pub const DEFAULT_CAPACITY: usize = 128;

    /// Largest accepted `capacity`; larger requests are reduced to this.
    pub const MAX_CAPACITY: usize = 4096;

    /// Build a graph at the panel's insertion cursor.
    #[must_use]
    pub fn new(panel: &Rc<PanelState>, name: &str, value: Binding<f32>, params: &Params) -> Self {
        let mut core = WidgetCore::new(panel, name, params);
        let theme = panel.theme();
        let width = width_option(params, theme.compact_width);
        core.set_size(Size::new(width, theme.widget_height));
        core.place();

        let capacity = params
            .get_i32_opt("capacity")
            .and_then(|c| usize::try_from(c).ok())
            .filter(|&c| c > 0)
            .unwrap_or(Self::DEFAULT_CAPACITY);
        if capacity > Self::MAX_CAPACITY {
            warn!("graph {name:?} capacity {capacity} reduced to {}", Self::MAX_CAPACITY);
        }
        let capacity = capacity.min(Self::MAX_CAPACITY);

        let mut graph = Self {
            core,
            value,
            min: params.get_f32("min", 0.0),
            max: params.get_f32("max", 1.0),
            capacity,
            samples: VecDeque::with_capacity(capacity + 1),
        };
        graph.update();
        debug!("created graph {name:?} holding {capacity} samples");
        graph
    }

    /// Display minimum.
    #[must_use]
    pub const fn min(&self) -> f32 {
        self.min
    }

    /// Display maximum.
    #[must_use]
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Maximum number of retained samples.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retained samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    /// Number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no sample is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Polyline vertices in panel-local space.
    ///
    /// Spacing follows the current sample count, so the line spans the full
    /// width even before the buffer first fills.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        let bounds = self.core.bounds();
        let half = bounds.height * 0.5;
        let center = bounds.y + half;
        let step = if self.samples.len() > 1 {
            bounds.width / (self.samples.len() - 1) as f32
        } else {
            0.0
        };
        self.samples
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                Point::new(
                    (i as f32).mul_add(step, bounds.x),
                    center + lmap(v, self.min, self.max, half, -half),
                )
            })
            .collect()
    }
}

impl Widget for MovingGraph {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let core = &self.core;
        let bounds = core.bounds();
        canvas.stroke_rect(bounds, core.stroke_color(), core.line_width());
        canvas.fill_rect(bounds, core.stroke_color());
        canvas.draw_path(&self.points(), core.active_stroke_color(), core.line_width());
    }

    fn update(&mut self) {
        self.samples.push_back(self.value.get());
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

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
