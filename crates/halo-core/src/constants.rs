use glam::Vec3;

// Shared visual tuning constants used by the web frontend and the core controllers.

// Model
pub const ICO_RADIUS: f32 = 1.2; // icosahedron circumradius in world units
pub const BALL_BASE_SCALE: f32 = 0.02; // unhighlighted vertex-ball radius
pub const BALL_REST_SCALE: f32 = 0.05; // vertex-ball radius before the first cursor move
pub const SPHERE_DETAIL: u8 = 2; // subdivision level of the shared unit ball mesh

// Subdivision control
pub const SUBDIVISION_MIN: u8 = 0;
pub const SUBDIVISION_MAX: u8 = 5;
pub const SUBDIVISION_DEFAULT: u8 = 0;

// Auto-rotation, radians per second on both x and y (0.01 per frame at 60 Hz)
pub const SPIN_RATE: f32 = 0.6;

// Camera
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_FOVY_DEG: f32 = 40.0;
pub const CAMERA_ZNEAR: f32 = 0.01;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Orbit controls
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // distance factor per wheel notch towards the target
pub const ORBIT_MIN_DISTANCE: f32 = 1.5;
pub const ORBIT_MAX_DISTANCE: f32 = 50.0;
pub const ORBIT_PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 1e-3;

// Background when the page does not provide one
pub const CLEAR_COLOR: [f32; 4] = [0.05, 0.06, 0.08, 1.0];

// Lighting
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(1.0, 1.0, 1.0); // normalized at use
pub const LIGHT_INTENSITY: f32 = 1.0;
pub const AMBIENT_COLOR: [f32; 3] = [0.25, 0.25, 0.25]; // 0x404040
pub const BALL_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
pub const BALL_SHININESS: f32 = 100.0;
pub const WIRE_COLOR: [f32; 3] = [0.3, 0.6, 0.3];
pub const WIRE_EDGE_WIDTH: f32 = 0.1; // barycentric distance over which edges fade out

// Post-processing defaults
pub const RGB_SHIFT_AMOUNT: f32 = 0.05; // UV offset of each colour channel

// 2D ring layout, fractions of the canvas height
pub const RING_FEATURE_COUNT: usize = 12;
pub const RING_BASE_RADIUS_FRACTION: f32 = 0.22;
pub const RING_SPREAD: f32 = 1.5; // ring radius = spread * base radius
pub const RING_DOT_RADIUS_FRACTION: f32 = 0.025;
pub const RING_DOT_COLOR: &str = "#FF0000";
