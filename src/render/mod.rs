mod frame;
mod primitives;
mod recording_view;
mod svg_view;
pub mod transition;
mod view;

pub use frame::RenderFrame;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, TextHAlign, TextPrimitive,
};
pub use recording_view::{RecordingView, ViewCall};
pub use svg_view::SvgStoryView;
pub use transition::{Interpolate, Transition};
pub use view::{DotClass, DotStyle, DotUpdate, NavControl, StoryView, TransitionSpec};
