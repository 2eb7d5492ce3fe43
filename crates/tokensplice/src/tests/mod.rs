mod arbitrary;
pub(crate) mod utils;
