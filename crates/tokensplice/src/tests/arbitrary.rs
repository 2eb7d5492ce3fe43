use alloc::{boxed::Box, format, string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};

/// One piece of a generated template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Text containing none of `$`, `{`, `}` or `\`.
    Literal(String),
    /// A `${...}` region whose expression contains no `}` or `\`.
    Region(String),
}

/// A well-formed `${...}` template: every region is closed and nothing is
/// escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Template(pub Vec<Segment>);

impl Template {
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.0 {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Region(expr) => out.push_str(&format!("${{{expr}}}")),
            }
        }
        out
    }

    pub fn expressions(&self) -> Vec<String> {
        self.0
            .iter()
            .filter_map(|segment| match segment {
                Segment::Region(expr) => Some(expr.clone()),
                Segment::Literal(_) => None,
            })
            .collect()
    }
}

fn filtered(g: &mut Gen, reject: &[char]) -> String {
    String::arbitrary(g)
        .chars()
        .filter(|c| !reject.contains(c))
        .collect()
}

impl Arbitrary for Segment {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Segment::Literal(filtered(g, &['$', '{', '}', '\\']))
        } else {
            Segment::Region(filtered(g, &['}', '\\']))
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Segment::Literal(s) => Box::new(s.shrink().map(Segment::Literal)),
            Segment::Region(s) => Box::new(s.shrink().map(Segment::Region)),
        }
    }
}

impl Arbitrary for Template {
    fn arbitrary(g: &mut Gen) -> Self {
        Template(Vec::arbitrary(g))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Template))
    }
}
