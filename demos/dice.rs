//! The falling-dice scene: a ground slab, two thrown dice, a sun with
//! shadows and a skybox. Run with `cargo run --example dice`.

use nalgebra::Vector3;
use std::error::Error;
use tumble::physics::{BodyDesc, BodyShape};
use tumble::scene::{AmbientLight, Color, DirectionalLight, Scene, Skybox};
use tumble::session::Session;
use tumble::sync::SyncConfig;
use tumble::windowing::{AppSettings, SceneDriver};
use winit::window::Window;

const DIE_MASS: f32 = 5.0;
const DIE_HALF_EXTENT: f32 = 0.38;

struct DiceDemo;

impl SceneDriver for DiceDemo {
    fn init(&mut self, session: &mut Session, _window: &Window) -> Result<(), Box<dyn Error>> {
        // Matches the cannon-es convention the scene was tuned against.
        session.physics.gravity = Vector3::new(0.0, -9.82, 0.0);

        let die_shape = BodyShape::Cuboid {
            hx: DIE_HALF_EXTENT,
            hy: DIE_HALF_EXTENT,
            hz: DIE_HALF_EXTENT,
        };

        let (ground, _) = session.spawn_tracked(
            "Ground",
            &BodyDesc::fixed(BodyShape::Cuboid {
                hx: 10.0,
                hy: 0.02,
                hz: 10.0,
            }),
        )?;
        if let Some(node) = session.scene.node_mut(ground) {
            node.receive_shadow = true;
        }

        let dice = [
            BodyDesc::dynamic(DIE_MASS, die_shape)
                .at(-5.0, 5.0, -5.0)
                .with_velocity(2.0, 2.0, 2.0)
                .with_axis_angle(Vector3::new(1.0, 0.0, 2.0), 20.0)
                .with_local_impulse(Vector3::new(2.0, 3.0, 5.0)),
            BodyDesc::dynamic(DIE_MASS, die_shape)
                .at(-6.0, 5.0, -5.0)
                .with_velocity(5.0, 5.5, 2.0)
                .with_axis_angle(Vector3::new(-0.5, 0.0, 2.0), 20.0)
                .with_local_impulse(Vector3::new(1.0, 2.0, 3.0)),
        ];
        for (i, desc) in dice.iter().enumerate() {
            let (node, _) = session.spawn_tracked(format!("Die{i}"), desc)?;
            if let Some(node) = session.scene.node_mut(node) {
                node.cast_shadow = true;
                node.receive_shadow = true;
            }
        }

        Ok(())
    }
}

fn main() {
    env_logger::init();

    let mut scene = Scene::new();

    scene.lighting.sun = Some(DirectionalLight {
        position: Vector3::new(20.0, 15.0, 5.0),
        ..DirectionalLight::default()
    });
    scene.lighting.ambient = AmbientLight {
        color: Color::BLACK,
    };
    scene.skybox = Some(Skybox::from_dir("assets/skybox", "jpg"));

    scene.camera.fov_y_deg = 40.0;
    scene.camera.znear = 1.0;
    scene.camera.zfar = 1000.0;
    scene.camera.position = Vector3::new(10.0, 5.0, 2.0);

    let session = Session::new(scene, SyncConfig::default());

    AppSettings::configure(DiceDemo, "Dice", 1280, 720)
        .run(session)
        .expect("Couldn't run app");
}
