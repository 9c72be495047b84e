//! Built-in rule-system layers, parents before children.

pub mod awakening;
pub mod base;
pub mod cod;
pub mod requiem;

use crate::pipeline::Layer;

/// Every built-in layer in registration order.
pub const BUILTIN_LAYERS: [Layer; 4] = [base::LAYER, cod::LAYER, requiem::LAYER, awakening::LAYER];
