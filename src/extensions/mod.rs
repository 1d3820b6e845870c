mod annotations;

pub use annotations::{
    AnnotationLayoutConfig, AnnotationSpec, PlacedAnnotation, place_annotation, wrap_label,
};
