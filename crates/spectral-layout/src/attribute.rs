//! Edge attribute resolution.
//!
//! Attribute problems never abort a layout: a value of an unexpected type, or a missing
//! attribute, degrades to the neutral weight `1.0` or sign `+1.0` so the edge still takes part
//! structurally.

use crate::graph::{AttributeValue, Edge};
use crate::options::SpectralOptions;

#[derive(Debug, Clone, Copy)]
pub struct AttributeResolver<'a> {
    weight_attribute: &'a str,
    weight_ignore: bool,
    sign_attribute: &'a str,
    sign_ignore: bool,
}

impl<'a> AttributeResolver<'a> {
    pub fn new(options: &'a SpectralOptions) -> Self {
        Self {
            weight_attribute: options.weight_attribute_name.as_str(),
            weight_ignore: options.weight_ignore,
            sign_attribute: options.sign_attribute_name.as_str(),
            sign_ignore: options.sign_ignore,
        }
    }

    /// Non-negative magnitude of the edge.
    pub fn weight(&self, edge: &Edge) -> f64 {
        if self.weight_ignore {
            return 1.0;
        }
        weight_of(edge.attribute(self.weight_attribute))
    }

    /// Polarity of the edge, `-1.0` or `+1.0`.
    pub fn sign(&self, edge: &Edge) -> f64 {
        if self.sign_ignore {
            return 1.0;
        }
        sign_of(edge.attribute(self.sign_attribute))
    }

    /// `sign * weight`, the signed adjacency entry contributed by the edge.
    pub fn signed_weight(&self, edge: &Edge) -> f64 {
        self.sign(edge) * self.weight(edge)
    }
}

pub fn weight_of(value: Option<&AttributeValue>) -> f64 {
    match value {
        Some(AttributeValue::Boolean(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(AttributeValue::Integer(i)) => (*i as f64).abs(),
        Some(AttributeValue::Float(f)) => f64::from(*f).abs(),
        Some(AttributeValue::Double(f)) => f.abs(),
        Some(AttributeValue::Other(_)) | None => 1.0,
    }
}

pub fn sign_of(value: Option<&AttributeValue>) -> f64 {
    let positive = match value {
        Some(AttributeValue::Boolean(b)) => *b,
        Some(AttributeValue::Integer(i)) => *i >= 0,
        Some(AttributeValue::Float(f)) => *f >= 0.0,
        Some(AttributeValue::Double(f)) => *f >= 0.0,
        Some(AttributeValue::Other(_)) | None => true,
    };
    if positive { 1.0 } else { -1.0 }
}
