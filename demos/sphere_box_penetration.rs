use log::info;
use rs_epa::interactions::collide;
use rs_epa::models::{Collider, ConvexShape, Quaternion};
use rs_epa::errors::CollisionError;
use rs_epa::utils::EpaConfig;

fn main() -> Result<(), CollisionError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let ground = Collider::aabb((5.0, 0.5, 5.0), (0.0, -0.5, 0.0))?;
    let config = EpaConfig::new(Some(64), Some(1e-3), None)?;

    let bodies = [
        Collider::sphere(0.5, (0.0, 0.3, 0.0))?,
        Collider::obb((0.5, 0.5, 0.5), (2.0, 0.4, 0.0), Quaternion::from_axis_angle((0.0, 0.0, 1.0), 0.6))?,
        Collider::new(ConvexShape::new_capsule(0.5, 0.25)?, (-2.0, 0.6, 1.0), Quaternion::identity()),
        Collider::new(ConvexShape::new_cylinder(0.3, 0.4)?, (0.0, 3.0, 0.0), Quaternion::identity()),
    ];

    for body in &bodies {
        match collide(&ground, body, &config) {
            Some(contact) => {
                let result = contact.result;
                info!(
                    "{} at {:?}: {} after {} iterations, depth {:.4}, normal ({:.3}, {:.3}, {:.3}), contact ({:.3}, {:.3}, {:.3})",
                    body.shape.name(),
                    body.position,
                    contact.status,
                    result.num_iterations,
                    result.penetration_depth,
                    result.normal.0, result.normal.1, result.normal.2,
                    result.point.0, result.point.1, result.point.2
                );
            },
            None => info!("{} at {:?}: no contact", body.shape.name(), body.position),
        }
    }

    Ok(())
}
