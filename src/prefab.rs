//! Template entities cloned into rolling stock and placed track objects.

use bevy::prelude::*;

/// Marker component for entities that serve as spawn templates.
///
/// Entities with this component are hidden automatically. Their mesh and
/// material are copied onto every entity spawned from them.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PrefabSource;

/// Visual components read from a template entity.
pub(crate) type PrefabVisuals<'a> = (
    Option<&'a Mesh3d>,
    Option<&'a MeshMaterial3d<StandardMaterial>>,
);

/// Hide entities marked as prefab sources.
pub fn hide_prefab_sources(mut sources: Query<&mut Visibility, Added<PrefabSource>>) {
    for mut visibility in &mut sources {
        *visibility = Visibility::Hidden;
    }
}

/// Copy the template's mesh and material onto a freshly spawned entity.
pub(crate) fn clone_visuals(entity_commands: &mut EntityCommands, visuals: Option<PrefabVisuals>) {
    let Some((mesh, material)) = visuals else {
        return;
    };
    if let Some(mesh) = mesh {
        entity_commands.insert(mesh.clone());
    }
    if let Some(material) = material {
        entity_commands.insert(material.clone());
    }
}
