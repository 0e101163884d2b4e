//! End-to-end editing flows through `SceneEditor`.

use kurbo::{Point, Vec2};
use proptest::prelude::*;
use scenekit_core::manipulation::Corner;
use scenekit_core::{
    CommitIntent, CommitOutcome, ComponentProperty, EditorConfig, ResizeHandle, Scene, SceneBase,
    SceneEditor, SceneError, SceneStore, SceneText, SceneTemplate, commit,
};
use std::time::{Duration, Instant};

fn store_with(left: i32, top: i32, width: i32, height: i32) -> SceneStore {
    let mut scene = Scene::new("Scene 1", 150).unwrap().with_id("s1");
    scene
        .insert(SceneText::new(SceneBase::new("t1", left, top, width, height).with_frames(0, 150), "Hello"))
        .unwrap();
    let mut store = SceneStore::new();
    store.add_scene(scene).unwrap();
    store
}

fn base_of(editor: &SceneEditor) -> SceneBase {
    editor.store().scene("s1").unwrap().find("t1").unwrap().base().clone()
}

#[test]
fn test_left_update_snaps_to_nearby_guideline() {
    let config = EditorConfig {
        vertical_guidelines: vec![0.0, 200.0, 960.0],
        ..EditorConfig::default()
    };
    let mut editor = SceneEditor::new(store_with(100, 100, 300, 80), config);
    let t0 = Instant::now();

    editor.select("s1", "t1").unwrap();
    editor.update_property(ComponentProperty::Left(205.0), t0).unwrap();
    assert_eq!(editor.tick(t0 + Duration::from_millis(999)).unwrap(), None);
    assert_eq!(
        editor.tick(t0 + Duration::from_millis(1000)).unwrap(),
        Some(CommitOutcome::Applied)
    );

    let base = base_of(&editor);
    assert_eq!((base.left, base.top), (200, 100));
}

#[test]
fn test_resize_from_se_handle_snaps_bottom_edge() {
    let mut editor = SceneEditor::new(store_with(100, 100, 400, 400), EditorConfig::default());
    let t0 = Instant::now();

    editor.select("s1", "t1").unwrap();
    assert!(editor.begin_resize(ResizeHandle::Corner(Corner::BottomRight)));
    for (i, step) in [(100.0, 10.0), (300.0, 30.0), (460.0, 50.0)].into_iter().enumerate() {
        editor.on_move(Vec2::new(step.0, step.1), t0 + Duration::from_millis(i as u64 * 8));
    }
    editor.end_gesture(t0 + Duration::from_millis(30)).unwrap();
    editor.tick(t0 + Duration::from_millis(1030)).unwrap();

    let base = base_of(&editor);
    assert_eq!((base.left, base.top), (100, 100));
    assert_eq!(base.left + base.width, 960);
    assert_eq!(base.top + base.height, 540);
}

#[test]
fn test_fractional_nw_resize_keeps_opposite_corner() {
    let mut editor = SceneEditor::new(store_with(100, 100, 400, 400), EditorConfig::default());
    let t0 = Instant::now();

    editor.select("s1", "t1").unwrap();
    assert!(editor.begin_resize(ResizeHandle::Corner(Corner::TopLeft)));
    editor.on_move(Vec2::new(-30.4, -20.4), t0);
    editor.end_gesture(t0).unwrap();
    editor.tick(t0 + Duration::from_secs(1)).unwrap();

    let base = base_of(&editor);
    assert_eq!((base.left, base.top), (69, 79));
    assert_eq!((base.left + base.width, base.top + base.height), (500, 500));
}

#[test]
fn test_pointer_driven_drag() {
    let mut editor = SceneEditor::new(store_with(100, 100, 200, 100), EditorConfig::default());
    let t0 = Instant::now();

    assert!(editor.pointer_down(Point::new(150.0, 150.0)).is_some());
    editor.on_move(Vec2::new(835.0, 0.0), t0);
    let outcome = editor.end_gesture(t0).unwrap().unwrap();
    // Right edge 1135 is nowhere near a line; left edge 935 is 25 away from 960.
    assert_eq!(outcome.rect.x0, 935.0);
    editor.tick(t0 + Duration::from_secs(1)).unwrap();
    assert_eq!(base_of(&editor).left, 935);
}

#[test]
fn test_canceled_gesture_leaves_scene_untouched() {
    let mut editor = SceneEditor::new(store_with(100, 100, 200, 100), EditorConfig::default());
    let t0 = Instant::now();
    let before = editor.store().clone();

    editor.select("s1", "t1").unwrap();
    editor.begin_drag();
    editor.on_move(Vec2::new(500.0, 500.0), t0);
    editor.cancel_gesture();
    assert_eq!(editor.end_gesture(t0).unwrap(), None);
    assert_eq!(editor.tick(t0 + Duration::from_secs(2)).unwrap(), None);
    assert_eq!(editor.store(), &before);
}

#[test]
fn test_deselect_before_quiet_period_commits_nothing() {
    let mut editor = SceneEditor::new(store_with(100, 100, 200, 100), EditorConfig::default());
    let t0 = Instant::now();

    editor.select("s1", "t1").unwrap();
    editor.update_property(ComponentProperty::Top(600.0), t0).unwrap();
    editor.deselect();
    assert_eq!(editor.tick(t0 + Duration::from_secs(3)).unwrap(), None);
    assert_eq!(base_of(&editor).top, 100);
}

#[test]
fn test_component_deleted_while_editing_is_not_resurrected() {
    let mut editor = SceneEditor::new(store_with(100, 100, 200, 100), EditorConfig::default());
    let t0 = Instant::now();

    editor.select("s1", "t1").unwrap();
    editor.update_property(ComponentProperty::Text("Edited".into()), t0).unwrap();
    // Deleted by another collaborator, bypassing the editor.
    editor.store_mut().scene_mut("s1").unwrap().remove("t1").unwrap();

    assert_eq!(editor.tick(t0 + Duration::from_secs(1)).unwrap(), None);
    assert!(editor.store().scene("s1").unwrap().components.is_empty());
}

#[test]
fn test_direct_commit_of_missing_component() {
    let mut scene = SceneTemplate::TitleAndVideo.create();
    let orphan = scene.components[0].clone();
    scene.remove(orphan.id()).unwrap();
    let before = scene.components.clone();

    let result = commit(&mut scene, &orphan);
    assert!(matches!(result, Err(SceneError::NotFound(_))));
    assert_eq!(scene.components, before);

    let mut store = SceneStore::new();
    let scene_id = scene.id.clone();
    store.add_scene(scene).unwrap();
    let intent = CommitIntent { scene_id, component: orphan };
    assert_eq!(store.commit(&intent).unwrap(), None);
}

proptest! {
    #[test]
    fn burst_of_updates_commits_once_with_last_value(
        gaps in prop::collection::vec(0u64..999, 1..30),
        values in prop::collection::vec(600i32..900, 30),
    ) {
        let mut editor = SceneEditor::new(store_with(100, 100, 200, 100), EditorConfig::default());
        let mut now = Instant::now();
        let mut commits = 0;

        editor.select("s1", "t1").unwrap();
        for (gap, value) in gaps.iter().zip(&values) {
            now += Duration::from_millis(*gap);
            if editor.tick(now).unwrap().is_some() {
                commits += 1;
            }
            editor.update_property(ComponentProperty::Left(f64::from(*value)), now).unwrap();
        }
        let last = values[gaps.len() - 1];
        if editor.tick(now + Duration::from_millis(1000)).unwrap().is_some() {
            commits += 1;
        }

        prop_assert_eq!(commits, 1);
        prop_assert_eq!(base_of(&editor).left, last);
    }
}
