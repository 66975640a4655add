//! Shapes supported by the penetration queries.
//!
//! Any convex shape can take part in a query as long as it implements [`SupportMap`].

pub use self::ball::Ball;
pub use self::convex_point_cloud::ConvexPointCloud;
pub use self::cuboid::Cuboid;
pub use self::support_map::SupportMap;

mod ball;
mod convex_point_cloud;
mod cuboid;
mod support_map;
