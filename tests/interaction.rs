use egui::{Color32, Pos2, pos2, vec2};
use plansketch::{Editor, EditorError, EditorEvent, EditorPrefs, Interaction, ShapeKind, ShapeStyle, Tool};

fn draw(editor: &mut Editor, tool: Tool, from: Pos2, to: Pos2) {
    editor.handle_event(EditorEvent::ToolSelected(tool)).unwrap();
    editor.handle_event(EditorEvent::PointerDown(from)).unwrap();
    editor.handle_event(EditorEvent::PointerMove(to)).unwrap();
    editor.handle_event(EditorEvent::PointerUp(to)).unwrap();
}

fn select_at(editor: &mut Editor, pos: Pos2) {
    editor.handle_event(EditorEvent::ToolSelected(Tool::Select)).unwrap();
    editor.handle_event(EditorEvent::PointerDown(pos)).unwrap();
    editor.handle_event(EditorEvent::PointerUp(pos)).unwrap();
}

#[test]
fn test_draw_commits_each_kind() {
    let mut editor = Editor::new();
    draw(&mut editor, Tool::Wall, pos2(0.0, 0.0), pos2(100.0, 0.0));
    draw(&mut editor, Tool::Rectangle, pos2(10.0, 10.0), pos2(60.0, 40.0));
    draw(&mut editor, Tool::Circle, pos2(70.0, 70.0), pos2(100.0, 110.0));
    draw(&mut editor, Tool::Door, pos2(120.0, 20.0), pos2(160.0, 60.0));
    draw(&mut editor, Tool::Window, pos2(120.0, 80.0), pos2(180.0, 100.0));

    let shapes = editor.document().shapes();
    assert_eq!(shapes.len(), 5);
    assert_eq!(shapes[0].kind, ShapeKind::Wall { end: pos2(100.0, 0.0) });
    assert_eq!(shapes[1].kind, ShapeKind::Rectangle { size: vec2(50.0, 30.0) });
    assert_eq!(shapes[2].kind, ShapeKind::Circle { size: vec2(30.0, 40.0) });
    assert_eq!(shapes[3].kind, ShapeKind::Door { size: vec2(40.0, 40.0) });
    assert_eq!(shapes[4].kind, ShapeKind::Window { size: vec2(60.0, 20.0) });
    // Every shape starts unrotated.
    assert!(shapes.iter().all(|shape| shape.rotation == 0.0));
}

#[test]
fn test_click_without_drag_commits_zero_extent_shape() {
    let mut editor = Editor::new();
    editor.handle_event(EditorEvent::ToolSelected(Tool::Rectangle)).unwrap();
    editor.handle_event(EditorEvent::PointerDown(pos2(5.0, 5.0))).unwrap();
    editor.handle_event(EditorEvent::PointerUp(pos2(5.0, 5.0))).unwrap();

    assert_eq!(editor.document().len(), 1);
    assert_eq!(
        editor.document().shapes()[0].kind,
        ShapeKind::Rectangle { size: vec2(0.0, 0.0) }
    );
    assert_eq!(editor.history_len(), 2);
}

#[test]
fn test_circle_boundary_point_selects() {
    let mut editor = Editor::new();
    // Dragging (0,0) to (30,40) makes a circle centered at (15,20) with
    // radius 25, so (40,20) sits exactly on the boundary.
    draw(&mut editor, Tool::Circle, pos2(0.0, 0.0), pos2(30.0, 40.0));
    select_at(&mut editor, pos2(40.0, 20.0));
    assert!(editor.document().selected_id().is_some());

    select_at(&mut editor, pos2(41.0, 20.0));
    assert_eq!(editor.document().selected_id(), None);
}

#[test]
fn test_rotation_handle_gesture() {
    let mut editor = Editor::new();
    draw(&mut editor, Tool::Rectangle, pos2(10.0, 10.0), pos2(30.0, 30.0));
    select_at(&mut editor, pos2(20.0, 20.0));

    // Selection outline spans (5,5)-(35,35); the rotation handle floats
    // 20 above its top edge at (20,-15).
    editor.handle_event(EditorEvent::PointerDown(pos2(20.0, -15.0))).unwrap();
    assert!(matches!(editor.interaction(), Interaction::Rotating { .. }));

    // Swing from straight above the center to straight right: +90.
    editor.handle_event(EditorEvent::PointerMove(pos2(55.0, 20.0))).unwrap();
    editor.handle_event(EditorEvent::PointerUp(pos2(55.0, 20.0))).unwrap();

    let rotation = editor.document().shapes()[0].rotation;
    assert!((rotation - 90.0).abs() < 1e-3, "rotation was {rotation}");
    assert_eq!(editor.history_len(), 3);
}

#[test]
fn test_handle_grab_without_drag_records_nothing() {
    let mut editor = Editor::new();
    draw(&mut editor, Tool::Rectangle, pos2(10.0, 10.0), pos2(30.0, 30.0));
    select_at(&mut editor, pos2(20.0, 20.0));
    assert_eq!(editor.history_len(), 2);

    editor.handle_event(EditorEvent::PointerDown(pos2(20.0, -15.0))).unwrap();
    editor.handle_event(EditorEvent::PointerUp(pos2(20.0, -15.0))).unwrap();
    assert_eq!(editor.history_len(), 2);
    assert_eq!(editor.document().shapes()[0].rotation, 0.0);

    editor.handle_event(EditorEvent::PointerDown(pos2(20.0, 45.0))).unwrap();
    editor.handle_event(EditorEvent::PointerUp(pos2(20.0, 45.0))).unwrap();
    assert_eq!(editor.history_len(), 2);
    assert_eq!(editor.document().shapes()[0].origin, pos2(10.0, 10.0));
}

#[test]
fn test_move_handle_gesture() {
    let mut editor = Editor::new();
    draw(&mut editor, Tool::Rectangle, pos2(10.0, 10.0), pos2(30.0, 30.0));
    select_at(&mut editor, pos2(20.0, 20.0));

    // Move handle sits 10 below the outline's bottom edge at (20,45).
    editor.handle_event(EditorEvent::PointerDown(pos2(20.0, 45.0))).unwrap();
    assert!(matches!(editor.interaction(), Interaction::Moving { .. }));

    editor.handle_event(EditorEvent::PointerMove(pos2(30.0, 55.0))).unwrap();
    editor.handle_event(EditorEvent::PointerUp(pos2(30.0, 55.0))).unwrap();

    let shape = &editor.document().shapes()[0];
    assert_eq!(shape.origin, pos2(20.0, 20.0));
    assert_eq!(shape.kind, ShapeKind::Rectangle { size: vec2(20.0, 20.0) });
    assert_eq!(editor.history_len(), 3);
}

#[test]
fn test_topmost_shape_wins_selection() {
    let mut editor = Editor::new();
    draw(&mut editor, Tool::Rectangle, pos2(0.0, 0.0), pos2(40.0, 40.0));
    draw(&mut editor, Tool::Rectangle, pos2(10.0, 10.0), pos2(50.0, 50.0));
    let top = editor.document().shapes()[1].id;

    select_at(&mut editor, pos2(20.0, 20.0));
    assert_eq!(editor.document().selected_id(), Some(top));
}

#[test]
fn test_tool_switch_cancels_provisional() {
    let mut editor = Editor::new();
    editor.handle_event(EditorEvent::ToolSelected(Tool::Rectangle)).unwrap();
    editor.handle_event(EditorEvent::PointerDown(pos2(0.0, 0.0))).unwrap();
    editor.handle_event(EditorEvent::PointerMove(pos2(30.0, 30.0))).unwrap();
    assert!(editor.document().provisional().is_some());

    editor.handle_event(EditorEvent::ToolSelected(Tool::Wall)).unwrap();
    assert!(editor.document().provisional().is_none());
    assert!(editor.document().is_empty());
    assert_eq!(editor.interaction(), Interaction::Idle);
    // The abandoned drag never reached the history.
    assert_eq!(editor.history_len(), 1);
}

#[test]
fn test_tool_switch_clears_selection_except_select() {
    let mut editor = Editor::new();
    draw(&mut editor, Tool::Rectangle, pos2(10.0, 10.0), pos2(60.0, 40.0));
    select_at(&mut editor, pos2(20.0, 20.0));
    assert!(editor.document().selected_id().is_some());

    editor.handle_event(EditorEvent::ToolSelected(Tool::Select)).unwrap();
    assert!(editor.document().selected_id().is_some());

    editor.handle_event(EditorEvent::ToolSelected(Tool::Erase)).unwrap();
    assert_eq!(editor.document().selected_id(), None);
}

#[test]
fn test_zoom_steps_and_reset() {
    let mut editor = Editor::new();
    editor.handle_event(EditorEvent::ZoomIn).unwrap();
    editor.handle_event(EditorEvent::ZoomIn).unwrap();
    assert_eq!(editor.view().zoom_percent(), 121);

    editor.handle_event(EditorEvent::ZoomOut).unwrap();
    assert_eq!(editor.view().zoom_percent(), 110);

    editor.handle_event(EditorEvent::ResetView).unwrap();
    assert_eq!(editor.view().zoom_percent(), 100);
}

#[test]
fn test_style_defaults_flow_into_new_shapes() {
    let mut editor = Editor::new();
    editor.handle_event(EditorEvent::SetLineWidth(5.0)).unwrap();
    editor.handle_event(EditorEvent::SetStrokeColor(Color32::RED)).unwrap();
    editor.handle_event(EditorEvent::SetFillColor(Color32::YELLOW)).unwrap();
    editor.handle_event(EditorEvent::SetOpacity(50.0)).unwrap();

    draw(&mut editor, Tool::Rectangle, pos2(0.0, 0.0), pos2(20.0, 20.0));
    let style = editor.document().shapes()[0].style;
    assert_eq!(style.line_width, 5.0);
    assert_eq!(style.stroke, Color32::RED);
    assert_eq!(style.fill, Color32::YELLOW);
    assert_eq!(style.opacity, 0.5);
}

#[test]
fn test_style_edit_applies_to_selected_without_snapshot() {
    let mut editor = Editor::new();
    draw(&mut editor, Tool::Rectangle, pos2(10.0, 10.0), pos2(60.0, 40.0));
    select_at(&mut editor, pos2(20.0, 20.0));
    assert_eq!(editor.history_len(), 2);

    editor.handle_event(EditorEvent::SetLineWidth(7.0)).unwrap();
    assert_eq!(editor.document().shapes()[0].style.line_width, 7.0);
    assert_eq!(editor.line_width(), 7.0);
    assert_eq!(editor.history_len(), 2);
}

#[test]
fn test_rotation_property_needs_selection() {
    let mut editor = Editor::new();
    draw(&mut editor, Tool::Rectangle, pos2(10.0, 10.0), pos2(60.0, 40.0));
    assert_eq!(
        editor.handle_event(EditorEvent::SetRotation(45.0)),
        Err(EditorError::EmptySelection)
    );

    select_at(&mut editor, pos2(20.0, 20.0));
    editor.handle_event(EditorEvent::SetRotation(45.0)).unwrap();
    assert_eq!(editor.selected_rotation(), Some(45.0));
}

#[test]
fn test_labels_toggle() {
    let mut editor = Editor::new();
    assert!(editor.show_labels());
    editor.handle_event(EditorEvent::SetLabelsVisible(false)).unwrap();
    assert!(!editor.show_labels());
}

#[test]
fn test_prefs_round_trip() {
    let prefs = EditorPrefs {
        tool: Tool::Circle,
        style: ShapeStyle {
            line_width: 4.0,
            stroke: Color32::BLUE,
            fill: Color32::LIGHT_GRAY,
            opacity: 0.8,
        },
        font_size: 24.0,
        show_labels: false,
    };
    let editor = Editor::with_prefs(prefs.clone());
    assert_eq!(editor.prefs(), prefs);
    assert_eq!(editor.tool(), Tool::Circle);
}

#[test]
fn test_stray_pointer_up_is_harmless() {
    let mut editor = Editor::new();
    editor.handle_event(EditorEvent::PointerUp(pos2(10.0, 10.0))).unwrap();
    assert_eq!(editor.history_len(), 1);
    assert_eq!(editor.interaction(), Interaction::Idle);
}

#[test]
fn test_second_pointer_down_mid_gesture_is_rejected() {
    let mut editor = Editor::new();
    editor.handle_event(EditorEvent::ToolSelected(Tool::Rectangle)).unwrap();
    editor.handle_event(EditorEvent::PointerDown(pos2(0.0, 0.0))).unwrap();
    assert_eq!(
        editor.handle_event(EditorEvent::PointerDown(pos2(5.0, 5.0))),
        Err(EditorError::InvalidToolState)
    );
    // The gesture in progress is unaffected.
    editor.handle_event(EditorEvent::PointerUp(pos2(20.0, 20.0))).unwrap();
    assert_eq!(editor.document().len(), 1);
}
