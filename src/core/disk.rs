use glam::IVec3;

/// Circular sampling region on the canvas. `z` of the center is carried through to every point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Disk {
    center: IVec3,
    radius: f32,
}

impl Disk {
    pub fn new(center: IVec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> IVec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn area(&self) -> f32 {
        std::f32::consts::PI * self.radius * self.radius
    }

    /// Maps `(u, v)` in `[0, 1)^2` onto the disk with uniform area density.
    pub fn sample_polar(&self, u: f32, v: f32) -> IVec3 {
        let theta = 2.0 * std::f32::consts::PI * u;
        let r = self.radius * v.sqrt();
        point_on_disk(theta, r, self.center)
    }

    /// Largest offset from the center along either axis a sampled point can have.
    /// `r < radius` and offsets truncate toward zero, so this is `ceil(radius) - 1`.
    pub fn reach(&self) -> i32 {
        (self.radius.ceil() as i32 - 1).max(0)
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        let reach = self.reach() as i64;
        let x = self.center.x as i64;
        let y = self.center.y as i64;
        x - reach >= 0 && y - reach >= 0 && x + reach < width as i64 && y + reach < height as i64
    }
}

/// Polar to canvas coordinates. Offsets are truncated toward zero, which pulls points
/// slightly toward the center's row and column.
pub fn point_on_disk(theta: f32, r: f32, center: IVec3) -> IVec3 {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let x = (r * sin_theta) as i32;
    let y = (r * cos_theta) as i32;
    IVec3::new(center.x + x, center.y + y, center.z)
}
