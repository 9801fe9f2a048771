//! Live dispatcher against the offline renderer.

use std::sync::Arc;

use ember_live::{Dispatcher, Framebuffer};
use ember_tracer::{
    pack_rgba, render, Camera, Color, Material, RenderConfig, Scene, Sphere, Vec3,
};

fn test_camera(width: u32, height: u32) -> Camera {
    let mut camera = Camera::new()
        .with_resolution(width, height)
        .with_position(Vec3::new(0.0, 1.0, 3.0), Vec3::new(0.0, 0.5, 0.0), Vec3::Y)
        .with_lens(45.0, 0.0, 3.0);
    camera.initialize();
    camera
}

fn test_scene() -> Scene {
    let mut scene = Scene::new();
    scene
        .add(
            Sphere::new(
                Vec3::new(0.0, -1000.0, 0.0),
                1000.0,
                Material::Diffuse {
                    albedo: Color::splat(0.5),
                },
            )
            .into(),
        )
        .unwrap();
    scene
        .add(
            Sphere::new(
                Vec3::new(0.0, 0.5, 0.0),
                0.5,
                Material::Reflective {
                    albedo: Color::new(0.7, 0.6, 0.5),
                    fuzz: 0.0,
                },
            )
            .into(),
        )
        .unwrap();
    scene
}

#[test]
fn live_pass_matches_offline_render() {
    let camera = Arc::new(test_camera(12, 8));
    let scene = Arc::new(test_scene());
    let config = RenderConfig {
        samples_per_pixel: 4,
        max_depth: 8,
        seed: 3000,
    };
    let framebuffer = Arc::new(Framebuffer::new(camera.image_width, camera.image_height));

    let dispatcher = Dispatcher::spawn(
        Arc::clone(&camera),
        Arc::clone(&scene),
        config.clone(),
        Arc::clone(&framebuffer),
        4,
    )
    .unwrap();
    dispatcher.join();

    let offline = render(&camera, &scene, &config).unwrap();
    let snapshot = framebuffer.snapshot();

    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let expected = pack_rgba(offline.get(x, y));
            let actual = snapshot[(y * camera.image_width + x) as usize];
            assert_eq!(actual, expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn finished_pass_reports_full_progress() {
    let camera = Arc::new(test_camera(6, 5));
    let scene = Arc::new(test_scene());
    let config = RenderConfig {
        samples_per_pixel: 1,
        max_depth: 4,
        seed: 0,
    };
    let framebuffer = Arc::new(Framebuffer::new(camera.image_width, camera.image_height));

    let dispatcher = Dispatcher::spawn(camera, scene, config, framebuffer, 2).unwrap();
    while !dispatcher.is_finished() {
        std::thread::yield_now();
    }

    assert_eq!(dispatcher.progress(), (5, 5));
    dispatcher.join();
}

#[test]
fn invalid_config_is_rejected_before_spawning() {
    let camera = Arc::new(test_camera(4, 4));
    let scene = Arc::new(test_scene());
    let config = RenderConfig {
        samples_per_pixel: 0,
        max_depth: 8,
        seed: 0,
    };
    let framebuffer = Arc::new(Framebuffer::new(4, 4));

    assert!(Dispatcher::spawn(camera, scene, config, framebuffer, 2).is_err());
}

#[test]
fn cancelled_pass_leaves_only_whole_rows() {
    // Cancel immediately; whatever rows did land must match the offline
    // render exactly, and untouched rows stay cleared.
    let camera = Arc::new(test_camera(8, 64));
    let scene = Arc::new(test_scene());
    let config = RenderConfig {
        samples_per_pixel: 2,
        max_depth: 8,
        seed: 9,
    };
    let framebuffer = Arc::new(Framebuffer::new(camera.image_width, camera.image_height));

    let dispatcher = Dispatcher::spawn(
        Arc::clone(&camera),
        Arc::clone(&scene),
        config.clone(),
        Arc::clone(&framebuffer),
        2,
    )
    .unwrap();
    dispatcher.cancel();
    dispatcher.join();

    let offline = render(&camera, &scene, &config).unwrap();
    for y in 0..camera.image_height {
        let row: Vec<u32> = (0..camera.image_width).map(|x| framebuffer.load(x, y)).collect();
        let rendered: Vec<u32> = (0..camera.image_width)
            .map(|x| pack_rgba(offline.get(x, y)))
            .collect();
        let cleared = vec![0u32; camera.image_width as usize];

        assert!(row == rendered || row == cleared, "row {y} is partial");
    }
}
