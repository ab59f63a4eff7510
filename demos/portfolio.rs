//! Portfolio Example
//!
//! A full-screen scrolling page with six sections. Scrolling moves the camera
//! and the avatar through the built-in portfolio choreography.
//!
//! Run with:
//!     cargo run --example portfolio
//!
//! Controls:
//! - Mouse wheel to scroll through the sections

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_scroll_rig::prelude::*;

/// Pixels scrolled per wheel line
const LINE_HEIGHT: f32 = 40.0;

/// Marker for the scrolling page
#[derive(Component)]
struct Page;

/// Marker for the navigation label showing the current section
#[derive(Component)]
struct NavLabel;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Scroll Rig Portfolio".to_string(),
                resolution: (1280, 800).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ScrollRigPlugin::new())
        .add_systems(Startup, setup)
        .add_systems(Update, (scroll_page, update_nav_label))
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<RigSettings>,
) {
    let camera = commands
        .spawn((
            Camera3d::default(),
            Transform::from_xyz(0.0, 0.0, 15.0),
            Projection::Perspective(PerspectiveProjection {
                fov: 50f32.to_radians(),
                ..default()
            }),
        ))
        .id();

    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            range: 100.0,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 20.0),
    ));

    // Decorative sphere behind the avatar
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(3.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.0, 0.6, 0.8),
            emissive: LinearRgba::rgb(0.0, 0.3, 0.4),
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, -5.0),
        Spin::sphere(),
    ));

    // The rig drives the avatar root; the idle turn sits on the model child
    let avatar = commands
        .spawn((Transform::default(), Visibility::default()))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Capsule3d::new(0.2, 0.5))),
                MeshMaterial3d(materials.add(Color::srgb(0.9, 0.7, 0.5))),
                Transform::default(),
                Spin::idle(),
            ));
        })
        .id();

    let container = commands
        .spawn((
            Page,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                overflow: Overflow::scroll_y(),
                ..default()
            },
            ScrollPosition::default(),
        ))
        .with_children(|page| {
            for label in SECTION_LABELS {
                page.spawn(Node {
                    width: Val::Percent(100.0),
                    min_height: Val::Vh(100.0),
                    padding: UiRect::all(Val::Px(48.0)),
                    ..default()
                })
                .with_child((
                    Text::new(label),
                    TextFont {
                        font_size: 48.0,
                        ..default()
                    },
                ));
            }
        })
        .id();

    commands.spawn((
        NavLabel,
        Text::new(SECTION_LABELS[0]),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            right: Val::Px(24.0),
            ..default()
        },
    ));

    if let Err(err) = commands.mount_scroll_rig(&settings, RigEntities { container, avatar, camera }) {
        error!("Failed to mount scroll rig: {err}");
    }
}

/// Bevy UI does not scroll on the mouse wheel by itself
fn scroll_page(mut wheel: MessageReader<MouseWheel>, mut pages: Query<&mut ScrollPosition, With<Page>>) {
    for event in wheel.read() {
        let dy = match event.unit {
            MouseScrollUnit::Line => event.y * LINE_HEIGHT,
            MouseScrollUnit::Pixel => event.y,
        };
        for mut position in &mut pages {
            // Upper bound is clamped by the UI layout
            position.0.y = (position.0.y - dy).max(0.0);
        }
    }
}

fn update_nav_label(
    mut changes: MessageReader<SectionChanged>,
    mut labels: Query<&mut Text, With<NavLabel>>,
) {
    for change in changes.read() {
        if change.track != TrackKind::Camera {
            continue;
        }
        for mut text in &mut labels {
            text.0 = change.label.clone();
        }
    }
}
