use std::fmt;

use crate::error::ShapeError;

/// The five membership function curves a fuzzy term can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    Trapezoid,
    Triangular,
    Gaussian,
    LeftGaussian,
    RightGaussian,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Trapezoid,
        ShapeKind::Triangular,
        ShapeKind::Gaussian,
        ShapeKind::LeftGaussian,
        ShapeKind::RightGaussian,
    ];

    /// Element name used for this shape in a fuzzy markup document.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Trapezoid => "trapezoidShape",
            Self::Triangular => "triangularShape",
            Self::Gaussian => "gaussianShape",
            Self::LeftGaussian => "leftGaussianShape",
            Self::RightGaussian => "rightGaussianShape",
        }
    }

    /// Exact number of positional parameters the shape takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Trapezoid => 4,
            Self::Triangular => 3,
            Self::Gaussian | Self::LeftGaussian | Self::RightGaussian => 2,
        }
    }

    /// Case insensitive lookup by element name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A parametrized membership function curve.
///
/// Parameters are stored exactly as given. Neither trapezoid/triangle point
/// ordering nor a positive sigma is checked.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    Trapezoid { a: f64, b: f64, c: f64, d: f64 },
    Triangular { a: f64, b: f64, c: f64 },
    Gaussian { mean: f64, sigma: f64 },
    LeftGaussian { mean: f64, sigma: f64 },
    RightGaussian { mean: f64, sigma: f64 },
}

impl Shape {
    pub fn new(shape_type: &str, params: &[f64]) -> Result<Self, ShapeError> {
        let kind = ShapeKind::from_tag(shape_type).ok_or_else(|| ShapeError::UnknownShape {
            tag: shape_type.to_owned(),
        })?;

        let shape = match (kind, params) {
            (ShapeKind::Trapezoid, &[a, b, c, d]) => Self::Trapezoid { a, b, c, d },
            (ShapeKind::Triangular, &[a, b, c]) => Self::Triangular { a, b, c },
            (ShapeKind::Gaussian, &[mean, sigma]) => Self::Gaussian { mean, sigma },
            (ShapeKind::LeftGaussian, &[mean, sigma]) => Self::LeftGaussian { mean, sigma },
            (ShapeKind::RightGaussian, &[mean, sigma]) => Self::RightGaussian { mean, sigma },
            (kind, params) => {
                return Err(ShapeError::Arity {
                    shape: kind,
                    expected: kind.arity(),
                    actual: params.len(),
                })
            }
        };

        Ok(shape)
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Trapezoid { .. } => ShapeKind::Trapezoid,
            Self::Triangular { .. } => ShapeKind::Triangular,
            Self::Gaussian { .. } => ShapeKind::Gaussian,
            Self::LeftGaussian { .. } => ShapeKind::LeftGaussian,
            Self::RightGaussian { .. } => ShapeKind::RightGaussian,
        }
    }

    /// Parameters in the same positional order they were constructed from.
    pub fn params(&self) -> Vec<f64> {
        match *self {
            Self::Trapezoid { a, b, c, d } => vec![a, b, c, d],
            Self::Triangular { a, b, c } => vec![a, b, c],
            Self::Gaussian { mean, sigma }
            | Self::LeftGaussian { mean, sigma }
            | Self::RightGaussian { mean, sigma } => vec![mean, sigma],
        }
    }
}

/// Builds a [`Shape`] from its element name and positional parameters.
pub fn create_shape(shape_type: &str, params: &[f64]) -> Result<Shape, ShapeError> {
    Shape::new(shape_type, params)
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Trapezoid { a, b, c, d } => write!(f, "{} [{a}, {b}, {c}, {d}]", self.kind()),
            Self::Triangular { a, b, c } => write!(f, "{} [{a}, {b}, {c}]", self.kind()),
            Self::Gaussian { mean, sigma }
            | Self::LeftGaussian { mean, sigma }
            | Self::RightGaussian { mean, sigma } => {
                write!(f, "{} mean: {mean}, sigma: {sigma}", self.kind())
            }
        }
    }
}

#[test]
fn test_create_each_shape() {
    assert_eq!(
        create_shape("trapezoidShape", &[0., 1., 2., 3.]),
        Ok(Shape::Trapezoid {
            a: 0.,
            b: 1.,
            c: 2.,
            d: 3.
        })
    );
    assert_eq!(
        create_shape("triangularShape", &[0., 5., 10.]),
        Ok(Shape::Triangular { a: 0., b: 5., c: 10. })
    );
    assert_eq!(
        create_shape("gaussianShape", &[5., 1.5]),
        Ok(Shape::Gaussian { mean: 5., sigma: 1.5 })
    );
    assert_eq!(
        create_shape("leftGaussianShape", &[2., 0.5]),
        Ok(Shape::LeftGaussian { mean: 2., sigma: 0.5 })
    );
    assert_eq!(
        create_shape("rightGaussianShape", &[8., 0.5]),
        Ok(Shape::RightGaussian { mean: 8., sigma: 0.5 })
    );
}

#[test]
fn test_tag_is_case_insensitive() {
    assert_eq!(create_shape("TRIANGULARSHAPE", &[1., 2., 3.]).map(|s| s.kind()), Ok(ShapeKind::Triangular));
    assert_eq!(create_shape("leftgaussianshape", &[1., 2.]).map(|s| s.kind()), Ok(ShapeKind::LeftGaussian));
}

#[test]
fn test_arity_mismatch() {
    assert_eq!(
        create_shape("trapezoidShape", &[0., 1., 2.]),
        Err(ShapeError::Arity {
            shape: ShapeKind::Trapezoid,
            expected: 4,
            actual: 3
        })
    );
    assert_eq!(
        create_shape("gaussianShape", &[0., 1., 2.]),
        Err(ShapeError::Arity {
            shape: ShapeKind::Gaussian,
            expected: 2,
            actual: 3
        })
    );
    assert!(matches!(
        create_shape("triangularShape", &[]),
        Err(ShapeError::Arity { expected: 3, actual: 0, .. })
    ));
}

#[test]
fn test_unknown_shape() {
    for params in [&[][..], &[1.][..], &[1., 2., 3., 4.][..]] {
        assert_eq!(
            create_shape("sigmoidShape", params),
            Err(ShapeError::UnknownShape {
                tag: "sigmoidShape".into()
            })
        );
    }
}

#[test]
fn test_params_keep_order_and_no_sorting() {
    let shape = create_shape("trapezoidShape", &[9., 1., 4., 2.]).unwrap();

    assert_eq!(shape.params(), vec![9., 1., 4., 2.]);
}

#[test]
fn test_display() {
    let tri = Shape::Triangular { a: 0., b: 2.5, c: 5. };
    let gauss = Shape::RightGaussian { mean: 7., sigma: 1. };

    assert_eq!(tri.to_string(), "triangularShape [0, 2.5, 5]");
    assert_eq!(gauss.to_string(), "rightGaussianShape mean: 7, sigma: 1");
}
