//! Canvas interaction state machine.
//!
//! The [`Canvas`] owns the scene and the selection group and turns pointer,
//! wheel and keyboard input ([`CanvasEvent`]) into node drags, group drags,
//! rubber-band selection, panning, zooming and context menus. It knows nothing
//! about egui frames: the UI layer translates raw input into events and paints
//! whatever state the canvas is in.
//!
//! Positions carried by events are screen coordinates. Scene coordinates are
//! derived from them through the current pan offset and zoom:
//! `scene = (screen - offset) / (zoom / 100)`.

use crate::constants::{scene_rect, DRAG_THRESHOLD, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
use crate::grid::{snap_scene_pos, snap_to_grid, GridPoint};
use crate::selection::SelectionGroup;
use crate::types::{Node, NodeId, NodeKind, Scene};
use eframe::egui;
use egui::PointerButton;

/// A single input event delivered to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    /// A pointer button went down
    PointerPressed {
        /// Screen position of the press
        pos: egui::Pos2,
        /// Which button
        button: PointerButton,
        /// Modifier keys held at the time of the press
        modifiers: egui::Modifiers,
    },
    /// The pointer moved
    PointerMoved {
        /// New screen position
        pos: egui::Pos2,
    },
    /// A pointer button was released
    PointerReleased {
        /// Screen position of the release
        pos: egui::Pos2,
        /// Which button
        button: PointerButton,
    },
    /// The wheel turned; positive `delta_y` zooms in
    Wheel {
        /// Pointer position, used as the zoom anchor when known
        pos: Option<egui::Pos2>,
        /// Vertical scroll amount
        delta_y: f32,
    },
    /// The Delete key was pressed
    DeletePressed,
}

/// What an active drag is doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragMode {
    /// Selecting every node touched by the rectangle between two screen points
    RubberBand {
        /// Screen position where the button went down
        origin: egui::Pos2,
        /// Current screen position
        current: egui::Pos2,
    },
    /// Scrolling the view
    Pan {
        /// Screen position at the previous move
        last: egui::Pos2,
    },
    /// Moving a single node
    Node {
        /// The node being moved
        id: NodeId,
        /// Grid-snapped offset of the pointer inside the node
        anchor: GridPoint,
    },
    /// Moving every member of the selection group
    Group {
        /// Grid-snapped scene position at the previous move
        last: GridPoint,
    },
}

/// Canvas interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No button held
    #[default]
    Idle,
    /// A multi-select toggle click is in progress; no drag may start
    SingleClickPending,
    /// A button is held but the pointer has not yet moved past the drag threshold
    Pressed {
        /// The held button
        button: PointerButton,
        /// Screen position of the press
        origin: egui::Pos2,
    },
    /// A drag is in progress
    Dragging(DragMode),
}

impl Gesture {
    /// The button that drives this gesture, if any.
    fn button(self) -> Option<PointerButton> {
        match self {
            Gesture::Idle => None,
            Gesture::Pressed { button, .. } => Some(button),
            Gesture::Dragging(DragMode::Pan { .. }) => Some(PointerButton::Secondary),
            Gesture::SingleClickPending | Gesture::Dragging(_) => Some(PointerButton::Primary),
        }
    }
}

/// The target of an open context menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContextMenuKind {
    /// Empty canvas; new nodes go to `scene_pos` (snapped on creation)
    Canvas {
        /// Scene position under the pointer when the menu opened
        scene_pos: GridPoint,
    },
    /// A single ungrouped node
    Node(NodeId),
    /// The selection group
    Group,
}

/// An open context menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenu {
    /// Screen position the menu is anchored at
    pub screen_pos: egui::Pos2,
    /// What the menu acts on
    pub kind: ContextMenuKind,
}

impl ContextMenu {
    /// Entries offered by this menu, in display order.
    pub fn actions(&self) -> Vec<MenuAction> {
        match self.kind {
            ContextMenuKind::Canvas { .. } => {
                NodeKind::ALL.iter().map(|k| MenuAction::AddNode(*k)).collect()
            }
            ContextMenuKind::Node(_) | ContextMenuKind::Group => vec![MenuAction::Destroy],
        }
    }
}

/// A context menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Create a node of this kind at the menu's scene position
    AddNode(NodeKind),
    /// Remove the menu's node or every member of the group
    Destroy,
}

impl MenuAction {
    /// Menu entry text.
    pub fn label(self) -> &'static str {
        match self {
            MenuAction::AddNode(NodeKind::Print) => "Add print",
            MenuAction::AddNode(NodeKind::Branch) => "Add branch",
            MenuAction::Destroy => "Destroy",
        }
    }
}

/// The interactive node canvas.
#[derive(Debug, Clone)]
pub struct Canvas {
    scene: Scene,
    group: SelectionGroup,
    gesture: Gesture,
    zoom: u32,
    /// Screen position of the scene origin
    pub offset: egui::Vec2,
    last_selected: Option<NodeId>,
    hovered: Option<NodeId>,
    context_menu: Option<ContextMenu>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            scene: Scene::new(),
            group: SelectionGroup::new(),
            gesture: Gesture::Idle,
            zoom: ZOOM_MAX,
            offset: egui::Vec2::ZERO,
            last_selected: None,
            hovered: None,
            context_menu: None,
        }
    }
}

impl Canvas {
    /// Creates an empty canvas at 100% zoom.
    pub fn new() -> Self {
        Self::default()
    }

    /// The scene holding every node.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The selection group.
    pub fn group(&self) -> &SelectionGroup {
        &self.group
    }

    /// Current interaction state.
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Current zoom in percent, always within 50..=100.
    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Current zoom as a scale factor.
    pub fn zoom_factor(&self) -> f32 {
        self.zoom as f32 / 100.0
    }

    /// Text of the on-screen zoom label.
    pub fn zoom_label(&self) -> String {
        format!("{}%", self.zoom)
    }

    /// The node most recently pressed or selected, if still in the scene.
    pub fn last_selected(&self) -> Option<NodeId> {
        self.last_selected
    }

    /// The open context menu, if any.
    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    /// Dismisses the open context menu without acting on it.
    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    /// Converts a screen position to scene coordinates.
    pub fn screen_to_scene(&self, screen_pos: egui::Pos2) -> egui::Pos2 {
        (screen_pos - self.offset) / self.zoom_factor()
    }

    /// Converts a scene position to screen coordinates.
    pub fn scene_to_screen(&self, scene_pos: egui::Pos2) -> egui::Pos2 {
        scene_pos * self.zoom_factor() + self.offset
    }

    /// Places the scene origin at the centre of the viewport.
    pub fn center_on_origin(&mut self, viewport: egui::Rect) {
        self.offset = viewport.center().to_vec2();
    }

    /// Keeps the scene point shown at the viewport centre inside the scene rectangle.
    pub fn clamp_offset(&mut self, viewport: egui::Rect) {
        let center = self.screen_to_scene(viewport.center());
        let clamped = scene_rect().clamp(center);
        if clamped != center {
            self.offset = viewport.center().to_vec2() - clamped.to_vec2() * self.zoom_factor();
        }
    }

    /// Rubber-band rectangle in screen coordinates while one is being dragged.
    pub fn rubber_band_rect(&self) -> Option<egui::Rect> {
        match self.gesture {
            Gesture::Dragging(DragMode::RubberBand { origin, current }) => {
                Some(egui::Rect::from_two_pos(origin, current))
            }
            _ => None,
        }
    }

    /// Cursor the view should show.
    pub fn cursor_icon(&self) -> egui::CursorIcon {
        match self.gesture {
            Gesture::Dragging(DragMode::Pan { .. }) => egui::CursorIcon::Grabbing,
            Gesture::Idle if self.hovered.is_some() => egui::CursorIcon::Move,
            _ => egui::CursorIcon::Default,
        }
    }

    /// One-line state summary for the debug overlay.
    pub fn debug_summary(&self) -> String {
        format!(
            "{:?} | nodes: {} | group: {} | last: {}",
            self.gesture,
            self.scene.len(),
            self.group.len(),
            self.last_selected
                .and_then(|id| self.scene.node(id))
                .map_or("-", |n| n.name()),
        )
    }

    /// Creates a node at the grid-snapped scene position and returns its id.
    pub fn add_node(&mut self, kind: NodeKind, scene_pos: GridPoint) -> NodeId {
        self.scene.add_node(Node::new(kind, scene_pos.x, scene_pos.y))
    }

    /// Removes a node from its group (if any) and from the scene.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if self.group.contains(id) {
            self.group.remove_member(&mut self.scene, id);
        }
        let removed = self.scene.remove_node(id).is_some();
        self.forget_missing();
        removed
    }

    /// Clears the selection group and every individually selected node.
    pub fn deselect_all(&mut self) {
        self.group.clear(&mut self.scene);
        for node in self.scene.nodes_mut() {
            node.selected = false;
        }
    }

    /// Deletes the selection.
    ///
    /// A non-empty selection group deletes exactly its members; otherwise every
    /// individually selected node is removed. Returns how many nodes were removed.
    pub fn delete_selection(&mut self) -> usize {
        let removed = if self.group.is_empty() {
            let selected = self.scene.selected_ids();
            selected
                .into_iter()
                .filter(|id| self.scene.remove_node(*id).is_some())
                .count()
        } else {
            self.group.delete(&mut self.scene)
        };
        self.forget_missing();
        removed
    }

    /// Runs the chosen context menu entry and closes the menu.
    pub fn apply_menu_action(&mut self, action: MenuAction) {
        let Some(menu) = self.context_menu.take() else {
            return;
        };
        match (menu.kind, action) {
            (ContextMenuKind::Canvas { scene_pos }, MenuAction::AddNode(kind)) => {
                self.add_node(kind, scene_pos);
            }
            (ContextMenuKind::Node(id), MenuAction::Destroy) => {
                self.remove_node(id);
            }
            (ContextMenuKind::Group, MenuAction::Destroy) => {
                self.group.delete(&mut self.scene);
                self.forget_missing();
            }
            (kind, action) => {
                log::warn!("menu action {action:?} does not apply to {kind:?}");
            }
        }
    }

    /// Feeds one input event through the state machine.
    pub fn handle_event(&mut self, event: CanvasEvent) {
        match event {
            CanvasEvent::PointerPressed {
                pos,
                button,
                modifiers,
            } => self.on_press(pos, button, modifiers),
            CanvasEvent::PointerMoved { pos } => self.on_move(pos),
            CanvasEvent::PointerReleased { pos, button } => self.on_release(pos, button),
            CanvasEvent::Wheel { pos, delta_y } => self.on_wheel(pos, delta_y),
            CanvasEvent::DeletePressed => {
                if self.gesture == Gesture::Idle {
                    self.delete_selection();
                }
            }
        }
    }

    fn on_press(&mut self, pos: egui::Pos2, button: PointerButton, modifiers: egui::Modifiers) {
        if self.context_menu.take().is_some() {
            return;
        }
        if self.gesture != Gesture::Idle {
            return;
        }

        let scene_pos = self.screen_to_scene(pos);
        let hit = self.scene.node_at(scene_pos);

        if button == PointerButton::Primary && modifiers.command {
            if let Some(id) = hit {
                let member = self.group.toggle(&mut self.scene, id);
                log::debug!("multi-select toggle on {id}: member={member}");
                self.last_selected = Some(id);
                self.gesture = Gesture::SingleClickPending;
                return;
            }
        }

        let hit_selected = hit
            .and_then(|id| self.scene.node(id))
            .is_some_and(|n| n.selected);
        if !hit_selected {
            self.deselect_all();
        }

        self.gesture = match (button, hit) {
            (PointerButton::Primary, Some(id)) => {
                self.last_selected = Some(id);
                if self.group.contains(id) {
                    Gesture::Dragging(DragMode::Group {
                        last: snap_scene_pos(scene_pos),
                    })
                } else if let Some(node) = self.scene.node_mut(id) {
                    node.selected = true;
                    let anchor = snap_to_grid(GridPoint::from_scene(scene_pos) - node.position);
                    Gesture::Dragging(DragMode::Node { id, anchor })
                } else {
                    Gesture::Idle
                }
            }
            (PointerButton::Primary | PointerButton::Secondary, _) => {
                Gesture::Pressed { button, origin: pos }
            }
            _ => Gesture::Idle,
        };
        log::debug!("press {button:?} -> {:?}", self.gesture);
    }

    fn on_move(&mut self, pos: egui::Pos2) {
        let scene_pos = self.screen_to_scene(pos);
        self.hovered = self.scene.node_at(scene_pos);

        let gesture = self.gesture;
        self.gesture = match gesture {
            Gesture::Pressed { button, origin } if (pos - origin).length() > DRAG_THRESHOLD => {
                match button {
                    PointerButton::Secondary => {
                        log::debug!("pan started");
                        Gesture::Dragging(DragMode::Pan { last: pos })
                    }
                    _ => {
                        log::debug!("rubber band started");
                        self.select_in_band(egui::Rect::from_two_pos(origin, pos));
                        Gesture::Dragging(DragMode::RubberBand {
                            origin,
                            current: pos,
                        })
                    }
                }
            }
            Gesture::Dragging(DragMode::Pan { last }) => {
                self.offset += pos - last;
                Gesture::Dragging(DragMode::Pan { last: pos })
            }
            Gesture::Dragging(DragMode::RubberBand { origin, .. }) => {
                self.select_in_band(egui::Rect::from_two_pos(origin, pos));
                Gesture::Dragging(DragMode::RubberBand {
                    origin,
                    current: pos,
                })
            }
            Gesture::Dragging(DragMode::Node { id, anchor }) => {
                if let Some(node) = self.scene.node_mut(id) {
                    node.position = snap_scene_pos(scene_pos) - anchor;
                }
                Gesture::Dragging(DragMode::Node { id, anchor })
            }
            Gesture::Dragging(DragMode::Group { last }) => {
                let now = snap_scene_pos(scene_pos);
                if now != last {
                    self.group.translate(&mut self.scene, now - last);
                }
                Gesture::Dragging(DragMode::Group { last: now })
            }
            other => other,
        };
    }

    fn on_release(&mut self, pos: egui::Pos2, button: PointerButton) {
        if self.gesture.button() != Some(button) {
            return;
        }
        let gesture = std::mem::take(&mut self.gesture);
        match gesture {
            Gesture::Dragging(DragMode::RubberBand { .. }) => {
                for id in self.scene.selected_ids() {
                    self.group.add_member(&mut self.scene, id);
                }
                log::debug!("rubber band grouped {} nodes", self.group.len());
            }
            Gesture::Pressed {
                button: PointerButton::Secondary,
                ..
            } => self.open_context_menu(pos),
            Gesture::Dragging(DragMode::Pan { .. }) => log::debug!("pan finished"),
            _ => {}
        }
    }

    fn on_wheel(&mut self, pos: Option<egui::Pos2>, delta_y: f32) {
        let new_zoom = if delta_y > 0.0 {
            self.zoom + ZOOM_STEP
        } else if delta_y < 0.0 {
            self.zoom.saturating_sub(ZOOM_STEP)
        } else {
            return;
        };
        if !(ZOOM_MIN..=ZOOM_MAX).contains(&new_zoom) {
            return;
        }

        let anchor = pos.map(|p| (p, self.screen_to_scene(p)));
        self.zoom = new_zoom;
        if let Some((screen, scene)) = anchor {
            self.offset = screen.to_vec2() - scene.to_vec2() * self.zoom_factor();
        }
        log::debug!("zoom {}", self.zoom_label());
    }

    fn open_context_menu(&mut self, pos: egui::Pos2) {
        let scene_pos = self.screen_to_scene(pos);
        let kind = match self.scene.node_at(scene_pos) {
            None if scene_rect().contains(scene_pos) => ContextMenuKind::Canvas {
                scene_pos: GridPoint::from_scene(scene_pos),
            },
            None => return,
            Some(id) if self.group.contains(id) => ContextMenuKind::Group,
            Some(id) => {
                self.deselect_all();
                if let Some(node) = self.scene.node_mut(id) {
                    node.selected = true;
                }
                self.last_selected = Some(id);
                ContextMenuKind::Node(id)
            }
        };
        self.context_menu = Some(ContextMenu {
            screen_pos: pos,
            kind,
        });
    }

    fn select_in_band(&mut self, screen_rect: egui::Rect) {
        let band = egui::Rect::from_two_pos(
            self.screen_to_scene(screen_rect.min),
            self.screen_to_scene(screen_rect.max),
        );
        let hits = self.scene.nodes_intersecting(band);
        for node in self.scene.nodes_mut() {
            node.selected = hits.contains(&node.id);
        }
    }

    fn forget_missing(&mut self) {
        if self.last_selected.is_some_and(|id| !self.scene.contains(id)) {
            self.last_selected = None;
        }
        if self.hovered.is_some_and(|id| !self.scene.contains(id)) {
            self.hovered = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(canvas: &mut Canvas, x: f32, y: f32, button: PointerButton) {
        canvas.handle_event(CanvasEvent::PointerPressed {
            pos: egui::pos2(x, y),
            button,
            modifiers: egui::Modifiers::NONE,
        });
    }

    fn toggle_click(canvas: &mut Canvas, x: f32, y: f32) {
        canvas.handle_event(CanvasEvent::PointerPressed {
            pos: egui::pos2(x, y),
            button: PointerButton::Primary,
            modifiers: egui::Modifiers::COMMAND,
        });
        release(canvas, x, y, PointerButton::Primary);
    }

    fn move_to(canvas: &mut Canvas, x: f32, y: f32) {
        canvas.handle_event(CanvasEvent::PointerMoved {
            pos: egui::pos2(x, y),
        });
    }

    fn release(canvas: &mut Canvas, x: f32, y: f32, button: PointerButton) {
        canvas.handle_event(CanvasEvent::PointerReleased {
            pos: egui::pos2(x, y),
            button,
        });
    }

    fn wheel(canvas: &mut Canvas, delta_y: f32) {
        canvas.handle_event(CanvasEvent::Wheel {
            pos: None,
            delta_y,
        });
    }

    /// Canvas with screen == scene coordinates.
    fn canvas_with(positions: &[(i32, i32)]) -> (Canvas, Vec<NodeId>) {
        let mut canvas = Canvas::new();
        let ids = positions
            .iter()
            .map(|(x, y)| canvas.add_node(NodeKind::Print, GridPoint::new(*x, *y)))
            .collect();
        (canvas, ids)
    }

    fn assert_group_consistent(canvas: &Canvas) {
        let gid = canvas.group().id();
        for node in canvas.scene().nodes() {
            let member = canvas.group().contains(node.id);
            assert_eq!(member, node.group == Some(gid));
            if member {
                assert!(node.selected);
            }
        }
    }

    #[test]
    fn test_canvas_menu_creates_snapped_print_node() {
        let mut canvas = Canvas::new();

        press(&mut canvas, 105.0, 187.0, PointerButton::Secondary);
        release(&mut canvas, 105.0, 187.0, PointerButton::Secondary);

        let menu = *canvas.context_menu().expect("canvas menu should open");
        assert_eq!(
            menu.actions(),
            vec![
                MenuAction::AddNode(NodeKind::Print),
                MenuAction::AddNode(NodeKind::Branch)
            ]
        );
        canvas.apply_menu_action(MenuAction::AddNode(NodeKind::Print));

        assert!(canvas.context_menu().is_none());
        let node = canvas.scene().nodes().next().expect("node created");
        assert_eq!(node.kind, NodeKind::Print);
        assert_eq!(node.position, GridPoint::new(100, 180));
    }

    #[test]
    fn test_canvas_menu_respects_pan_and_zoom() {
        let mut canvas = Canvas::new();
        canvas.offset = egui::vec2(400.0, 300.0);
        wheel(&mut canvas, -1.0);
        assert_eq!(canvas.zoom(), 90);

        // screen (445, 345) -> scene (50, 50)
        press(&mut canvas, 445.0, 345.0, PointerButton::Secondary);
        release(&mut canvas, 445.0, 345.0, PointerButton::Secondary);
        canvas.apply_menu_action(MenuAction::AddNode(NodeKind::Branch));

        let node = canvas.scene().nodes().next().unwrap();
        assert_eq!(node.position, GridPoint::new(40, 40));
    }

    #[test]
    fn test_canvas_menu_outside_scene_rect_does_not_open() {
        let mut canvas = Canvas::new();

        press(&mut canvas, 2500.0, 0.0, PointerButton::Secondary);
        release(&mut canvas, 2500.0, 0.0, PointerButton::Secondary);

        assert!(canvas.context_menu().is_none());
    }

    #[test]
    fn test_press_dismisses_open_menu_and_is_consumed() {
        let (mut canvas, ids) = canvas_with(&[(0, 0)]);
        press(&mut canvas, 500.0, 500.0, PointerButton::Secondary);
        release(&mut canvas, 500.0, 500.0, PointerButton::Secondary);
        assert!(canvas.context_menu().is_some());

        press(&mut canvas, 10.0, 10.0, PointerButton::Primary);

        assert!(canvas.context_menu().is_none());
        assert_eq!(canvas.gesture(), Gesture::Idle);
        assert!(!canvas.scene().node(ids[0]).unwrap().selected);
    }

    #[test]
    fn test_multi_select_toggle_adds_then_removes() {
        let (mut canvas, ids) = canvas_with(&[(0, 0)]);

        canvas.handle_event(CanvasEvent::PointerPressed {
            pos: egui::pos2(10.0, 10.0),
            button: PointerButton::Primary,
            modifiers: egui::Modifiers::COMMAND,
        });
        assert_eq!(canvas.gesture(), Gesture::SingleClickPending);
        // no drag while the toggle click is pending
        move_to(&mut canvas, 200.0, 200.0);
        assert_eq!(canvas.scene().node(ids[0]).unwrap().position, GridPoint::new(0, 0));
        release(&mut canvas, 200.0, 200.0, PointerButton::Primary);
        assert_eq!(canvas.gesture(), Gesture::Idle);

        assert!(canvas.group().contains(ids[0]));
        assert!(canvas.scene().node(ids[0]).unwrap().selected);
        assert_group_consistent(&canvas);

        toggle_click(&mut canvas, 10.0, 10.0);

        assert!(canvas.group().is_empty());
        let node = canvas.scene().node(ids[0]).unwrap();
        assert!(!node.selected);
        assert!(node.group.is_none());
    }

    #[test]
    fn test_node_drag_follows_snapped_pointer() {
        let (mut canvas, ids) = canvas_with(&[(100, 100)]);

        // pointer 27,33 inside the node -> anchor (20, 20)
        press(&mut canvas, 127.0, 133.0, PointerButton::Primary);
        assert!(canvas.scene().node(ids[0]).unwrap().selected);
        assert_eq!(canvas.last_selected(), Some(ids[0]));

        move_to(&mut canvas, 251.0, 318.0);
        let pos = canvas.scene().node(ids[0]).unwrap().position;
        assert_eq!(pos, GridPoint::new(240 - 20, 300 - 20));
        assert!(pos.is_grid_aligned());

        move_to(&mut canvas, -7.0, 5.0);
        assert_eq!(
            canvas.scene().node(ids[0]).unwrap().position,
            GridPoint::new(-40, -20)
        );

        release(&mut canvas, -7.0, 5.0, PointerButton::Primary);
        assert_eq!(canvas.gesture(), Gesture::Idle);
    }

    #[test]
    fn test_press_on_other_node_clears_previous_selection() {
        let (mut canvas, ids) = canvas_with(&[(0, 0), (400, 0)]);
        press(&mut canvas, 10.0, 10.0, PointerButton::Primary);
        release(&mut canvas, 10.0, 10.0, PointerButton::Primary);

        press(&mut canvas, 410.0, 10.0, PointerButton::Primary);
        release(&mut canvas, 410.0, 10.0, PointerButton::Primary);

        assert!(!canvas.scene().node(ids[0]).unwrap().selected);
        assert!(canvas.scene().node(ids[1]).unwrap().selected);
    }

    #[test]
    fn test_rubber_band_groups_every_touched_node() {
        let (mut canvas, ids) = canvas_with(&[(0, 0), (200, 0), (400, 200), (1000, 1000)]);

        press(&mut canvas, -50.0, -50.0, PointerButton::Primary);
        move_to(&mut canvas, 100.0, 100.0);
        assert!(canvas.rubber_band_rect().is_some());
        move_to(&mut canvas, 450.0, 250.0);
        release(&mut canvas, 450.0, 250.0, PointerButton::Primary);

        assert_eq!(canvas.gesture(), Gesture::Idle);
        assert!(canvas.rubber_band_rect().is_none());
        assert_eq!(canvas.group().len(), 3);
        for id in &ids[..3] {
            assert!(canvas.group().contains(*id));
            assert!(canvas.scene().node(*id).unwrap().selected);
        }
        assert!(!canvas.scene().node(ids[3]).unwrap().selected);
        assert_group_consistent(&canvas);
    }

    #[test]
    fn test_rubber_band_shrinking_releases_nodes() {
        let (mut canvas, ids) = canvas_with(&[(0, 0), (400, 0)]);

        press(&mut canvas, -50.0, -50.0, PointerButton::Primary);
        move_to(&mut canvas, 500.0, 50.0);
        move_to(&mut canvas, 100.0, 50.0);
        release(&mut canvas, 100.0, 50.0, PointerButton::Primary);

        assert_eq!(canvas.group().members(), &[ids[0]]);
        assert!(!canvas.scene().node(ids[1]).unwrap().selected);
    }

    #[test]
    fn test_small_press_on_empty_space_deselects_without_band() {
        let (mut canvas, ids) = canvas_with(&[(0, 0)]);
        toggle_click(&mut canvas, 10.0, 10.0);
        assert_eq!(canvas.group().len(), 1);

        press(&mut canvas, 600.0, 600.0, PointerButton::Primary);
        move_to(&mut canvas, 601.0, 601.0);
        assert!(canvas.rubber_band_rect().is_none());
        release(&mut canvas, 601.0, 601.0, PointerButton::Primary);

        assert!(canvas.group().is_empty());
        assert!(!canvas.scene().node(ids[0]).unwrap().selected);
    }

    #[test]
    fn test_group_drag_moves_all_members() {
        let (mut canvas, ids) = canvas_with(&[(0, 0), (200, 0), (600, 600)]);
        toggle_click(&mut canvas, 10.0, 10.0);
        toggle_click(&mut canvas, 210.0, 10.0);

        press(&mut canvas, 215.0, 15.0, PointerButton::Primary);
        assert!(matches!(
            canvas.gesture(),
            Gesture::Dragging(DragMode::Group { .. })
        ));
        move_to(&mut canvas, 275.0, 57.0);
        release(&mut canvas, 275.0, 57.0, PointerButton::Primary);

        assert_eq!(canvas.scene().node(ids[0]).unwrap().position, GridPoint::new(60, 40));
        assert_eq!(canvas.scene().node(ids[1]).unwrap().position, GridPoint::new(260, 40));
        assert_eq!(canvas.scene().node(ids[2]).unwrap().position, GridPoint::new(600, 600));
        assert_eq!(canvas.group().len(), 2);
        assert_group_consistent(&canvas);
    }

    #[test]
    fn test_secondary_drag_pans_without_menu() {
        let (mut canvas, ids) = canvas_with(&[(0, 0)]);
        toggle_click(&mut canvas, 10.0, 10.0);

        press(&mut canvas, 500.0, 500.0, PointerButton::Secondary);
        assert!(canvas.group().is_empty(), "secondary press on empty space deselects");
        move_to(&mut canvas, 510.0, 500.0);
        assert_eq!(canvas.cursor_icon(), egui::CursorIcon::Grabbing);
        move_to(&mut canvas, 560.0, 530.0);
        release(&mut canvas, 560.0, 530.0, PointerButton::Secondary);

        assert_eq!(canvas.offset, egui::vec2(50.0, 30.0));
        assert!(canvas.context_menu().is_none());
        assert_eq!(canvas.gesture(), Gesture::Idle);
        assert_eq!(canvas.scene().node(ids[0]).unwrap().position, GridPoint::new(0, 0));
    }

    #[test]
    fn test_node_menu_selects_only_that_node_and_destroys_it() {
        let (mut canvas, ids) = canvas_with(&[(0, 0), (400, 0)]);
        press(&mut canvas, 410.0, 10.0, PointerButton::Primary);
        release(&mut canvas, 410.0, 10.0, PointerButton::Primary);

        press(&mut canvas, 10.0, 10.0, PointerButton::Secondary);
        release(&mut canvas, 10.0, 10.0, PointerButton::Secondary);

        let menu = *canvas.context_menu().unwrap();
        assert_eq!(menu.kind, ContextMenuKind::Node(ids[0]));
        assert_eq!(menu.actions(), vec![MenuAction::Destroy]);
        assert!(canvas.scene().node(ids[0]).unwrap().selected);
        assert!(!canvas.scene().node(ids[1]).unwrap().selected);

        canvas.apply_menu_action(MenuAction::Destroy);

        assert!(!canvas.scene().contains(ids[0]));
        assert_eq!(canvas.scene().len(), 1);
        assert_eq!(canvas.last_selected(), None);
    }

    #[test]
    fn test_group_menu_destroys_members() {
        let (mut canvas, ids) = canvas_with(&[(0, 0), (200, 0), (600, 600)]);
        toggle_click(&mut canvas, 10.0, 10.0);
        toggle_click(&mut canvas, 210.0, 10.0);

        press(&mut canvas, 210.0, 10.0, PointerButton::Secondary);
        release(&mut canvas, 210.0, 10.0, PointerButton::Secondary);
        assert_eq!(canvas.context_menu().unwrap().kind, ContextMenuKind::Group);

        canvas.apply_menu_action(MenuAction::Destroy);

        assert_eq!(canvas.scene().len(), 1);
        assert!(canvas.scene().contains(ids[2]));
        assert!(canvas.group().is_empty());
    }

    #[test]
    fn test_mismatched_menu_action_is_ignored() {
        let mut canvas = Canvas::new();
        press(&mut canvas, 50.0, 50.0, PointerButton::Secondary);
        release(&mut canvas, 50.0, 50.0, PointerButton::Secondary);

        canvas.apply_menu_action(MenuAction::Destroy);

        assert!(canvas.context_menu().is_none());
        assert!(canvas.scene().is_empty());
    }

    #[test]
    fn test_delete_with_group_removes_only_grouped_nodes() {
        let (mut canvas, ids) = canvas_with(&[(0, 0), (200, 0), (600, 600)]);
        toggle_click(&mut canvas, 10.0, 10.0);
        toggle_click(&mut canvas, 210.0, 10.0);
        // selected but ungrouped
        canvas.scene.node_mut(ids[2]).unwrap().selected = true;

        canvas.handle_event(CanvasEvent::DeletePressed);

        assert_eq!(canvas.scene().len(), 1);
        assert!(canvas.scene().contains(ids[2]));
        assert!(canvas.group().is_empty());
    }

    #[test]
    fn test_delete_without_group_removes_selected_nodes() {
        let (mut canvas, ids) = canvas_with(&[(0, 0), (400, 0)]);
        press(&mut canvas, 10.0, 10.0, PointerButton::Primary);
        release(&mut canvas, 10.0, 10.0, PointerButton::Primary);

        canvas.handle_event(CanvasEvent::DeletePressed);

        assert_eq!(canvas.scene().len(), 1);
        assert!(canvas.scene().contains(ids[1]));
    }

    #[test]
    fn test_delete_is_ignored_mid_gesture() {
        let (mut canvas, _) = canvas_with(&[(0, 0)]);
        press(&mut canvas, 10.0, 10.0, PointerButton::Primary);

        canvas.handle_event(CanvasEvent::DeletePressed);

        assert_eq!(canvas.scene().len(), 1);
    }

    #[test]
    fn test_zoom_clamps_in_both_directions() {
        let mut canvas = Canvas::new();
        assert_eq!(canvas.zoom(), 100);

        for _ in 0..5 {
            wheel(&mut canvas, 120.0);
            assert_eq!(canvas.zoom(), 100);
        }

        let mut seen = Vec::new();
        for _ in 0..6 {
            wheel(&mut canvas, -120.0);
            seen.push(canvas.zoom());
        }
        assert_eq!(seen, vec![90, 80, 70, 60, 50, 50]);
        assert_eq!(canvas.zoom_label(), "50%");

        wheel(&mut canvas, 0.0);
        assert_eq!(canvas.zoom(), 50);
        wheel(&mut canvas, 1.0);
        assert_eq!(canvas.zoom(), 60);
    }

    #[test]
    fn test_zoom_stays_in_range_under_mixed_sequence() {
        let mut canvas = Canvas::new();
        let pattern = [1.0, -1.0, -1.0, -1.0, 1.0, -1.0, -1.0, -1.0, -1.0, -1.0, 1.0, 1.0];
        let mut previous = canvas.zoom();
        for delta in pattern.iter().cycle().take(100) {
            wheel(&mut canvas, *delta);
            let zoom = canvas.zoom();
            assert!((ZOOM_MIN..=ZOOM_MAX).contains(&zoom));
            assert!(zoom.abs_diff(previous) == 0 || zoom.abs_diff(previous) == ZOOM_STEP);
            previous = zoom;
        }
    }

    #[test]
    fn test_zoom_keeps_point_under_pointer() {
        let mut canvas = Canvas::new();
        canvas.offset = egui::vec2(300.0, 200.0);
        let anchor = egui::pos2(420.0, 260.0);
        let before = canvas.screen_to_scene(anchor);

        canvas.handle_event(CanvasEvent::Wheel {
            pos: Some(anchor),
            delta_y: -1.0,
        });

        let after = canvas.screen_to_scene(anchor);
        assert!((before - after).length() < 1e-3);
    }

    #[test]
    fn test_clamp_offset_keeps_view_in_scene() {
        let mut canvas = Canvas::new();
        let viewport = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 800.0));
        canvas.center_on_origin(viewport);
        assert_eq!(canvas.screen_to_scene(viewport.center()), egui::Pos2::ZERO);

        canvas.offset = egui::vec2(5000.0, 400.0);
        canvas.clamp_offset(viewport);

        let center = canvas.screen_to_scene(viewport.center());
        assert_eq!(center, egui::pos2(-2000.0, 0.0));
    }

    #[test]
    fn test_hover_cursor() {
        let (mut canvas, _) = canvas_with(&[(0, 0)]);
        move_to(&mut canvas, 10.0, 10.0);
        assert_eq!(canvas.cursor_icon(), egui::CursorIcon::Move);
        move_to(&mut canvas, 500.0, 500.0);
        assert_eq!(canvas.cursor_icon(), egui::CursorIcon::Default);
    }

    #[test]
    fn test_release_of_other_button_keeps_gesture() {
        let (mut canvas, _) = canvas_with(&[(0, 0)]);
        press(&mut canvas, 10.0, 10.0, PointerButton::Primary);

        release(&mut canvas, 10.0, 10.0, PointerButton::Secondary);

        assert!(matches!(
            canvas.gesture(),
            Gesture::Dragging(DragMode::Node { .. })
        ));
    }

    #[test]
    fn test_debug_summary_mentions_counts() {
        let (mut canvas, _) = canvas_with(&[(0, 0)]);
        press(&mut canvas, 10.0, 10.0, PointerButton::Primary);
        release(&mut canvas, 10.0, 10.0, PointerButton::Primary);

        let summary = canvas.debug_summary();
        assert!(summary.contains("nodes: 1"));
        assert!(summary.contains("last: Print"));
    }
}
