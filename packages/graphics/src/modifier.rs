//! Modifiers that map one canvas onto another canvas, and eventually onto the
//! render target.

use vek::*;


/// Any modifier in 2D space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Modifier2 {
    /// Apply an affine transform to the geometry.
    Transform(Transform2),
    /// Apply color multiplication.
    Color(Rgba<f32>),
    /// Discard all fragments lying in a half-plane.
    Clip(Clip2),
}

impl From<Transform2> for Modifier2 {
    fn from(inner: Transform2) -> Self {
        Modifier2::Transform(inner)
    }
}

impl From<Rgba<f32>> for Modifier2 {
    fn from(inner: Rgba<f32>) -> Self {
        Modifier2::Color(inner)
    }
}

impl From<Clip2> for Modifier2 {
    fn from(inner: Clip2) -> Self {
        Modifier2::Clip(inner)
    }
}


/// A 2D affine transform modifier. Is a newtype around a matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2(pub Mat3<f32>);

impl Transform2 {
    /// Identity transform.
    pub fn identity() -> Self {
        Transform2(Mat3::identity())
    }

    /// Translate by `v`.
    pub fn translate<V: Into<Vec2<f32>>>(v: V) -> Self {
        Transform2(Mat3::translation_2d(v))
    }

    /// Component-wise scale by `v`.
    pub fn scale<V: Into<Vec2<f32>>>(v: V) -> Self {
        let v = v.into();
        Transform2(Mat3::scaling_3d([v.x, v.y, 1.0]))
    }

    /// Rotate clockwise by `r` radians.
    pub fn rotate(r: f32) -> Self {
        Transform2(Mat3::rotation_z(-r))
    }

    /// Apply this transformation to a point.
    ///
    /// This is useful for mapping from object space to screen space, eg. for
    /// rendering.
    pub fn apply<V: Into<Vec2<f32>>>(&self, v: V) -> Vec2<f32> {
        (self.0 * Vec3::from_point_2d(v)).xy()
    }

    /// Attempt to apply this transformation to a point in reverse such that
    /// `a.reverse_apply(a.apply(v)) == v`.
    ///
    /// This is useful for mapping from screen space to object space, eg. for
    /// cursor hit-testing.
    ///
    /// Returns `None` if this transformation is irreversible, such as a scale
    /// by 0.
    pub fn reverse_apply<V: Into<Vec2<f32>>>(&self, v: V) -> Option<Vec2<f32>> {
        if self.0.determinant() != 0.0 {
            let inverted = Mat3::from(Mat4::from(self.0).inverted());
            Some((inverted * Vec3::from_point_2d(v)).xy())
        } else {
            None
        }
    }

    /// Compose with another such that
    /// `b.apply(a.apply(v)) == a.then(b).apply(v)`.
    pub fn then(&self, other: &Self) -> Self {
        Transform2(other.0 * self.0)
    }

    /// Apply this transformation to a clip, such that
    /// `c.test(v) == a.apply_clip(c).test(a.apply(v))`.
    ///
    /// This allows one to convert a "clip, then transform" sequence into a
    /// "transform, then clip" sequence that remains logically the same.
    pub fn apply_clip(&self, clip: &Clip2) -> Clip2 {
        if self.0.determinant() != 0.0 {
            let inverted = Mat3::from(Mat4::from(self.0).inverted());
            Clip2(inverted.transposed() * clip.0)
        } else {
            Clip2(Vec3::new(0.0, 0.0, 1.0))
        }
    }
}


/// A 2D clip modifier.
///
/// Is a newtype around a vector <a,b,c>. Represents an instruction to discard
/// any fragment <x,y> for which (<x,y,1> dot <a,b,c>) < 0. Can be visualized
/// as a line through the plane dividing it into a "keep" half and a "discard"
/// half.
///
/// See `Transform2::apply_clip`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Clip2(pub Vec3<f32>);

impl Clip2 {
    /// Discard x < f.
    pub fn min_x(f: f32) -> Self {
        Clip2([1.0, 0.0, -f].into())
    }

    /// Discard x > f.
    pub fn max_x(f: f32) -> Self {
        Clip2([-1.0, 0.0, f].into())
    }

    /// Discard y < f.
    pub fn min_y(f: f32) -> Self {
        Clip2([0.0, 1.0, -f].into())
    }

    /// Discard y > f.
    pub fn max_y(f: f32) -> Self {
        Clip2([0.0, -1.0, f].into())
    }

    /// Whether this clip would allow the given point to remain (as opposed to
    /// being clipped out).
    pub fn test(&self, v: Vec2<f32>) -> bool {
        self.0.dot(Vec3::from_point_2d(v)) >= 0.0
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_round_trip() {
        let t = Transform2::translate([3.0, -2.0])
            .then(&Transform2::scale([2.0, 0.5]));
        let v = Vec2::new(1.5, 4.0);
        let mapped = t.apply(v);
        let back = t.reverse_apply(mapped).unwrap();
        assert!((back - v).magnitude() < 1e-5);
    }

    #[test]
    fn degenerate_scale_is_irreversible() {
        let t = Transform2::scale([0.0, 1.0]);
        assert_eq!(t.reverse_apply([1.0, 1.0]), None);
    }

    #[test]
    fn clip_commutes_with_transform() {
        let t = Transform2::translate([1.0, 0.0])
            .then(&Transform2::scale([1.0, 0.5]));
        let c = Clip2::min_x(0.5);
        for &v in &[Vec2::new(1.0, 2.0), Vec2::new(0.2, -1.0), Vec2::new(0.5, 0.0)] {
            assert_eq!(c.test(v), t.apply_clip(&c).test(t.apply(v)));
        }
    }

    #[test]
    fn clip_half_planes() {
        assert!(Clip2::min_x(1.0).test([2.0, 0.0].into()));
        assert!(!Clip2::min_x(1.0).test([0.5, 0.0].into()));
        assert!(Clip2::max_y(3.0).test([0.0, 2.0].into()));
        assert!(!Clip2::max_y(3.0).test([0.0, 4.0].into()));
    }
}
