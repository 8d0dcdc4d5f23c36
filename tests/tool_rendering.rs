use egui::{Color32, pos2};
use image::{Rgba, RgbaImage};
use raster_paint::{
    DragRect, Editor, EditorConfig, Surface, SurfaceHandle, Tool, ToolKind, ToolStyle,
};

const GREEN: Rgba<u8> = Rgba([0, 200, 0, 255]);
const BLANK: Rgba<u8> = Rgba([0, 0, 0, 0]);

fn style(color: Color32, width: f32, fill: bool) -> ToolStyle {
    ToolStyle { color, width, fill }
}

fn setup_filled(width: u32, height: u32, fill: Rgba<u8>) -> (Editor, SurfaceHandle) {
    let surface = Surface::shared(width, height).unwrap();
    for pixel in surface.write().pixels_mut().pixels_mut() {
        *pixel = fill;
    }
    let mut editor = Editor::new(&EditorConfig::default());
    editor.setup(&surface);
    (editor, surface)
}

fn pixels(surface: &SurfaceHandle) -> RgbaImage {
    surface.read().pixels().clone()
}

fn painted_with(surface: &SurfaceHandle, kind: ToolKind, style: ToolStyle, drag: DragRect) -> RgbaImage {
    let mut tool = kind.instantiate(style);
    tool.begin(drag.start());
    tool.configure(drag);
    tool.render(&mut surface.write());
    pixels(surface)
}

#[test]
fn test_preview_redraw_is_idempotent() {
    let (mut editor, surface) = setup_filled(120, 90, BLANK);
    editor.choose_tool(ToolKind::Brush.instantiate(style(
        Color32::from_rgba_unmultiplied(200, 30, 30, 90),
        9.0,
        false,
    )));

    editor.pointer_down(pos2(10.0, 10.0));
    editor.pointer_move(pos2(60.0, 40.0));
    editor.pointer_move(pos2(100.0, 20.0));
    let first = pixels(&surface);

    for _ in 0..3 {
        editor.redraw();
        assert_eq!(pixels(&surface), first);
    }
}

#[test]
fn test_redraw_while_idle_keeps_committed_pixels() {
    let (mut editor, surface) = setup_filled(50, 50, BLANK);
    editor.choose_tool(ToolKind::Rectangle.instantiate(style(
        Color32::from_rgba_unmultiplied(255, 0, 0, 100),
        1.0,
        true,
    )));

    editor.pointer_down(pos2(10.0, 10.0));
    editor.pointer_move(pos2(30.0, 30.0));
    editor.pointer_up(pos2(30.0, 30.0));
    let committed = pixels(&surface);
    let version = surface.read().version();

    editor.redraw();
    editor.redraw();

    assert_eq!(pixels(&surface), committed);
    assert_eq!(surface.read().version(), version);
    assert_eq!(editor.undo_len(), 1);
}

#[test]
fn test_preview_does_not_accumulate() {
    let (mut editor, surface) = setup_filled(80, 80, BLANK);
    editor.choose_tool(ToolKind::Rectangle.instantiate(style(Color32::RED, 4.0, false)));

    editor.pointer_down(pos2(10.0, 10.0));
    editor.pointer_move(pos2(50.0, 50.0));
    assert_ne!(surface.read().pixel(49, 20), Some(BLANK));

    editor.pointer_move(pos2(30.0, 30.0));
    assert_eq!(surface.read().pixel(49, 20), Some(BLANK));
    assert_ne!(surface.read().pixel(29, 20), Some(BLANK));
}

#[test]
fn test_reversed_drag_gives_same_rectangle() {
    for fill in [false, true] {
        let rect_style = style(Color32::RED, 3.0, fill);

        let (mut forward, forward_surface) = setup_filled(150, 150, BLANK);
        forward.choose_tool(ToolKind::Rectangle.instantiate(rect_style));
        forward.pointer_down(pos2(10.0, 10.0));
        forward.pointer_move(pos2(100.0, 100.0));
        forward.pointer_up(pos2(100.0, 100.0));

        let (mut backward, backward_surface) = setup_filled(150, 150, BLANK);
        backward.choose_tool(ToolKind::Rectangle.instantiate(rect_style));
        backward.pointer_down(pos2(100.0, 100.0));
        backward.pointer_move(pos2(10.0, 10.0));
        backward.pointer_up(pos2(10.0, 10.0));

        assert_eq!(pixels(&forward_surface), pixels(&backward_surface));
    }
}

#[test]
fn test_tool_switch_keeps_committed_pixels() {
    let (mut editor, surface) = setup_filled(100, 100, BLANK);
    editor.choose_tool(ToolKind::Rectangle.instantiate(style(Color32::RED, 4.0, false)));
    editor.pointer_down(pos2(10.0, 10.0));
    editor.pointer_move(pos2(40.0, 40.0));
    editor.pointer_up(pos2(40.0, 40.0));
    let committed = pixels(&surface);

    editor.choose_tool(ToolKind::Brush.instantiate(style(Color32::BLUE, 3.0, false)));
    assert_eq!(pixels(&surface), committed);

    editor.pointer_down(pos2(60.0, 60.0));
    editor.pointer_move(pos2(90.0, 90.0));
    editor.pointer_up(pos2(90.0, 90.0));

    let after = pixels(&surface);
    for (x, y, pixel) in committed.enumerate_pixels() {
        if x < 50 && y < 50 {
            assert_eq!(after.get_pixel(x, y), pixel);
        }
    }
    assert_eq!(after.get_pixel(75, 75), &Rgba([0, 0, 255, 255]));
}

#[test]
fn test_render_stays_inside_footprint() {
    let (_editor, surface) = setup_filled(60, 60, GREEN);
    let drag = DragRect::new(40.0, 40.0, 20.0, 20.0);
    let after = painted_with(&surface, ToolKind::Rectangle, style(Color32::RED, 2.0, false), drag);

    for (x, y, pixel) in after.enumerate_pixels() {
        let inside_band = (19..41).contains(&x) && (19..41).contains(&y);
        if !inside_band {
            assert_eq!(*pixel, GREEN, "pixel ({x}, {y}) changed");
        }
    }
    // Outline only, the interior keeps the old content
    assert_eq!(*after.get_pixel(30, 30), GREEN);
}

#[test]
fn test_degenerate_drags_do_not_fail() {
    for kind in ToolKind::ALL {
        let (_editor, surface) = setup_filled(20, 20, BLANK);
        painted_with(&surface, kind, style(Color32::RED, 1.0, true), DragRect::at(pos2(5.0, 5.0)));
        painted_with(&surface, kind, style(Color32::RED, 1.0, false), DragRect::new(5.0, 5.0, 5.0, 15.0));
    }

    // A filled zero-area rectangle paints nothing
    let (_editor, surface) = setup_filled(20, 20, BLANK);
    let after = painted_with(
        &surface,
        ToolKind::Rectangle,
        style(Color32::RED, 1.0, true),
        DragRect::at(pos2(5.0, 5.0)),
    );
    assert!(after.pixels().all(|pixel| *pixel == BLANK));
}

#[test]
fn test_brush_click_leaves_a_dot() {
    let (mut editor, surface) = setup_filled(20, 20, BLANK);
    editor.choose_tool(ToolKind::Brush.instantiate(style(Color32::RED, 5.0, false)));

    editor.pointer_down(pos2(5.0, 5.0));
    editor.pointer_move(pos2(5.0, 5.0));
    editor.pointer_up(pos2(5.0, 5.0));

    assert_eq!(surface.read().pixel(4, 4), Some(Rgba([255, 0, 0, 255])));
    assert_eq!(surface.read().pixel(15, 15), Some(BLANK));
}

#[test]
fn test_eraser_clears_to_transparent() {
    let (mut editor, surface) = setup_filled(40, 40, GREEN);
    editor.choose_tool(ToolKind::Eraser.instantiate(style(Color32::RED, 6.0, false)));

    editor.pointer_down(pos2(5.0, 10.0));
    editor.pointer_move(pos2(35.0, 10.0));
    editor.pointer_up(pos2(35.0, 10.0));

    assert_eq!(surface.read().pixel(20, 10), Some(BLANK));
    assert_eq!(surface.read().pixel(20, 30), Some(GREEN));

    editor.undo();
    editor.settle();
    assert_eq!(surface.read().pixel(20, 10), Some(GREEN));
}

#[test]
fn test_draw_with_leaves_current_tool_alone() {
    let (mut editor, surface) = setup_filled(50, 50, BLANK);
    editor.choose_tool(ToolKind::Brush.instantiate(ToolStyle::default()));

    let mut line = ToolKind::Line.instantiate(style(Color32::RED, 2.0, false));
    editor.draw_with(&mut line, DragRect::new(0.0, 25.0, 50.0, 25.0));
    assert_eq!(surface.read().pixel(25, 25), Some(Rgba([255, 0, 0, 255])));
    assert_eq!(editor.current_tool().map(|tool| tool.kind()), Some(ToolKind::Brush));

    editor.repaint_baseline();
    assert_eq!(surface.read().pixel(25, 25), Some(BLANK));
}

#[test]
fn test_style_is_read_at_render_time() {
    let (mut editor, surface) = setup_filled(50, 50, BLANK);
    editor.choose_tool(ToolKind::Rectangle.instantiate(style(Color32::RED, 2.0, true)));

    editor.pointer_down(pos2(10.0, 10.0));
    editor.pointer_move(pos2(30.0, 30.0));
    if let Some(tool) = editor.current_tool_mut() {
        tool.style_mut().color = Color32::BLUE;
    }
    editor.redraw();

    assert_eq!(surface.read().pixel(20, 20), Some(Rgba([0, 0, 255, 255])));
}
