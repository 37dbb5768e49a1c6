pub(crate) mod composite;
pub(crate) mod compositor;
pub(crate) mod surface;
pub(crate) mod text_svg;
