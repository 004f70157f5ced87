use core::ops;
use core::fmt;

macro_rules! vec_op_impl {
    ($trait: ident, $func: ident, $v: ident, $($e: ident),*) => {
        impl ops::$trait<$v> for $v {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: $v) -> $v {
                $v { $( $e: self.$e.$func(rhs.$e), )* }
            }
        }
    }
}

macro_rules! vec_assign_op_impl {
    ($trait: ident, $func: ident, $v: ident, $($e: ident),*) => {
        impl ops::$trait<$v> for $v {
            #[inline]
            fn $func(&mut self, rhs: $v) {
                $( self.$e.$func(rhs.$e); )*
            }
        }
    }
}

macro_rules! scalar_op_impl {
    ($trait: ident, $func: ident, $v: ident, $($e: ident),*) => {

        impl ops::$trait<f32> for $v {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: f32) -> $v {
                $v { $( $e: self.$e.$func(rhs), )* }
            }
        }

        impl ops::$trait<$v> for f32 {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: $v) -> $v {
                $v { $( $e: self.$func(rhs.$e), )* }
            }
        }
    }
}

macro_rules! vec_impl {
    ($v: ident, $n: expr, $($e: ident),*) => {

        #[derive(Debug, Default, Copy, Clone, PartialEq,
                 bytemuck::Pod, bytemuck::Zeroable)]
        #[repr(C)]
        pub struct $v {
            $( pub $e : f32, )*
        }

        impl $v {
            #[inline]
            pub fn new($( $e: f32, )*) -> $v {
                $v { $( $e : $e, )* }
            }

            #[inline]
            pub fn from_scalar(a: f32) -> $v {
                $v { $( $e : a, )* }
            }

            #[inline]
            pub fn from_slice(a: &[f32; $n]) -> $v {
                bytemuck::cast(*a)
            }

            #[inline]
            pub fn to_slice(self) -> [f32; $n] {
                bytemuck::cast(self)
            }

            #[inline]
            pub fn dot(self, b: $v) -> f32 {
                // Adding negative zero (-0.0) is a nop in IEEE 754 floating
                // point, while adding positive zero can change the sign of
                // negative zero, thus llvm only optimizes out (-0.0).
                $( self.$e * b.$e + )* (-0.0)
            }

            #[inline]
            pub fn length2(self) -> f32 {
                $v::dot(self, self)
            }

            #[inline]
            pub fn length(self) -> f32 {
                $v::length2(self).sqrt()
            }

            #[inline]
            pub fn normalized(self) -> $v {
                self * (1.0 / $v::length(self))
            }

            #[inline]
            pub fn is_finite(self) -> bool {
                $( self.$e.is_finite() && )* true
            }
        }

        impl ops::Neg for $v {
            type Output = $v;

            #[inline]
            fn neg(self) -> $v {
                $v { $( $e: self.$e.neg(), )* }
            }
        }

        impl fmt::Display for $v {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}({})", stringify!($v),
                        vec![$(
                           format!("{:.prec$}", self.$e, prec = f.precision().unwrap_or(3)),
                        )*].join(", "))
            }
        }

        vec_op_impl!(Add, add, $v, $($e),*);
        vec_op_impl!(Sub, sub, $v, $($e),*);
        vec_op_impl!(Mul, mul, $v, $($e),*);
        vec_op_impl!(Div, div, $v, $($e),*);

        vec_assign_op_impl!(AddAssign, add_assign, $v, $($e),*);
        vec_assign_op_impl!(SubAssign, sub_assign, $v, $($e),*);
        vec_assign_op_impl!(MulAssign, mul_assign, $v, $($e),*);
        vec_assign_op_impl!(DivAssign, div_assign, $v, $($e),*);

        scalar_op_impl!(Add, add, $v, $($e),*);
        scalar_op_impl!(Sub, sub, $v, $($e),*);
        scalar_op_impl!(Mul, mul, $v, $($e),*);
        scalar_op_impl!(Div, div, $v, $($e),*);
    }
}

vec_impl!(Vec2, 2, x, y);
vec_impl!(Vec3, 3, x, y, z);
vec_impl!(Vec4, 4, x, y, z, w);

impl Vec3 {
    #[inline]
    pub fn cross(self, b: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * b.z - self.z * b.y,
            y: self.z * b.x - self.x * b.z,
            z: self.x * b.y - self.y * b.x,
        }
    }
}

impl Vec4 {
    #[inline]
    pub fn from_vec3(v: Vec3, w: f32) -> Vec4 {
        Vec4 { x: v.x, y: v.y, z: v.z, w }
    }

    #[inline]
    pub fn xyz(self) -> Vec3 {
        Vec3 { x: self.x, y: self.y, z: self.z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn componentwise_and_scalar_ops() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, a * 2.0);

        let mut c = a;
        c += b;
        assert_eq!(c, Vec3::new(5.0, 7.0, 9.0));
    }

    #[test]
    fn dot_cross_normalize() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);

        assert_eq!(x.dot(y), 0.0);
        assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));

        let v = Vec3::new(3.0, 0.0, 4.0);
        assert!((v.length() - 5.0).abs() < 1e-6);
        assert!((v.normalized().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn finite_check() {
        assert!(Vec3::new(1.0, 2.0, 3.0).is_finite());
        assert!(!Vec3::new(f32::NAN, 0.0, 0.0).is_finite());
        assert!(!Vec3::new(0.0, f32::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn slice_round_trip() {
        let v = Vec2::new(0.25, -0.5);
        assert_eq!(Vec2::from_slice(&v.to_slice()), v);
    }
}
