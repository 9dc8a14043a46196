use std::{
    fmt,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign},
};

use paste::paste;

/// Position (or offset) in the grid, stored as `(row, col)`.
///
/// Signed, so stepping off the grid yields a value that bounds checks can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);
    pub const ONE: Dims = Dims(1, 1);

    pub fn abs_sum(self) -> i32 {
        self.0.abs() + self.1.abs()
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl From<(i32, i32)> for Dims {
    fn from((row, col): (i32, i32)) -> Self {
        Dims(row, col)
    }
}

/// Point in drawing space. `x` grows with columns, `y` with rows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn min(self, other: Point) -> Point {
        Point::new(self.x.min(other.x), self.y.min(other.y))
    }

    pub fn max(self, other: Point) -> Point {
        Point::new(self.x.max(other.x), self.y.max(other.y))
    }
}

macro_rules! impl_op {
    ($trait:ident, $op:ident, $ty:ident { $($field:tt),+ }, $item:ty) => {
        impl $trait for $ty {
            type Output = $ty;

            #[inline(always)]
            fn $op(self, other: $ty) -> $ty {
                $ty { $($field: self.$field.$op(other.$field)),+ }
            }
        }

        impl $trait<$item> for $ty {
            type Output = $ty;

            #[inline(always)]
            fn $op(self, other: $item) -> $ty {
                $ty { $($field: self.$field.$op(other)),+ }
            }
        }

        paste! {
            impl [<$trait Assign>] for $ty {
                #[inline(always)]
                fn [<$op _assign>](&mut self, other: $ty) {
                    *self = self.$op(other);
                }
            }

            impl [<$trait Assign>]<$item> for $ty {
                #[inline(always)]
                fn [<$op _assign>](&mut self, other: $item) {
                    *self = self.$op(other);
                }
            }
        }
    };
}

macro_rules! impl_ops {
    ( $(($ty:ident { $($field:tt),+ }, $item:ty)),* ) => {
        $(
            impl_op!(Add, add, $ty { $($field),+ }, $item);
            impl_op!(Sub, sub, $ty { $($field),+ }, $item);
            impl_op!(Mul, mul, $ty { $($field),+ }, $item);
            impl_op!(Div, div, $ty { $($field),+ }, $item);
        )*
    };
}

impl_ops![(Dims { 0, 1 }, i32), (Point { x, y }, f64)];
