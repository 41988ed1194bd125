// SPDX-License-Identifier: GPL-3.0-only

//! Win32 backend: key injection via `SendInput` and the overlay window shell.
//!
//! The shell is a layered, topmost, borderless popup. The magenta background
//! is keyed out, so only the painted circles are visible: the grab dot while
//! collapsed, the radial menu while expanded. A `WM_TIMER` tick drives the
//! widget's deadline timers (auto-collapse, hold release, chord pacing).
//!
//! Widget state lives in a `Box` behind `GWLP_USERDATA`, the usual Win32
//! pattern for carrying Rust state into a window procedure. Events that
//! arrive before the state is attached are passed to `DefWindowProcW`.

use std::mem;
use std::time::Instant;

use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreateSolidBrush, DeleteObject, Ellipse, EndPaint, FillRect, GetStockObject,
    InvalidateRect, SelectObject, HBRUSH, NULL_BRUSH, PAINTSTRUCT,
};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, GetCapture, ReleaseCapture, SetCapture, INPUT, INPUT_0, INPUT_KEYBOARD,
    KEYBDINPUT, KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP, VIRTUAL_KEY,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DispatchMessageW, GetClientRect, GetMessageW,
    GetSystemMetrics, GetWindowLongPtrW, GetWindowRect, KillTimer, LoadCursorW, MessageBoxW,
    PostQuitMessage, RegisterClassW, SetLayeredWindowAttributes, SetTimer, SetWindowLongPtrW,
    SetWindowPos, GWLP_USERDATA, IDC_ARROW, LWA_COLORKEY, MB_ICONERROR, MB_OK, MSG,
    SM_CXSCREEN, SM_CYSCREEN, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER,
    WM_DESTROY, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE, WM_PAINT, WM_TIMER, WNDCLASSW,
    WS_EX_LAYERED, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP, WS_VISIBLE,
};
use windows::core::{w, PCWSTR};

use crate::app::Widget;
use crate::app_settings;
use crate::config::Config;
use crate::gesture::{Point, PointerKind};
use crate::input::{KeyEvent, KeySink, KeyState};
use crate::menu::{MenuState, SurfaceError, WindowSurface};
use crate::shortcuts::ShortcutAction;

/// Timer id of the periodic widget tick.
const TICK_TIMER: usize = 1;

/// Color key treated as fully transparent (COLORREF is 0x00BBGGRR).
const KEY_CLR: COLORREF = COLORREF(0x00FF00FF);
/// Fill of the collapsed dot and the central handle.
const DOT_CLR: COLORREF = COLORREF(0x00D27B30);
/// Fill of the expanded menu disc.
const DISC_CLR: COLORREF = COLORREF(0x00463C32);
/// Fill of the action buttons.
const BTN_CLR: COLORREF = COLORREF(0x00E0A060);
/// Fill of the close button.
const CLOSE_CLR: COLORREF = COLORREF(0x00555599);

// ============================================================================
// Key injection
// ============================================================================

/// Key sink backed by `SendInput`.
///
/// Injection failures are logged and swallowed; the OS gives no way to
/// observe them downstream anyway.
#[derive(Debug, Default)]
pub struct SendInputSink;

impl KeySink for SendInputSink {
    fn send(&mut self, event: KeyEvent) {
        let flags = match event.state {
            KeyState::Pressed => KEYBD_EVENT_FLAGS(0),
            KeyState::Released => KEYEVENTF_KEYUP,
        };
        let input = INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(u16::from(event.key.code())),
                    wScan: 0,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        };

        let sent = unsafe { SendInput(&[input], mem::size_of::<INPUT>() as i32) };
        if sent == 0 {
            tracing::warn!("SendInput rejected {:?} {}", event.state, event.key);
        }
    }
}

// ============================================================================
// Window surface
// ============================================================================

/// [`WindowSurface`] over the overlay window handle.
#[derive(Debug)]
pub struct Win32Surface {
    hwnd: HWND,
    menu_visible: bool,
}

impl Win32Surface {
    fn new(hwnd: HWND) -> Self {
        Self {
            hwnd,
            menu_visible: false,
        }
    }

    /// Returns whether the menu visuals are currently shown.
    #[must_use]
    pub fn menu_visible(&self) -> bool {
        self.menu_visible
    }
}

impl WindowSurface for Win32Surface {
    fn set_size(&mut self, width: f32, height: f32) -> Result<(), SurfaceError> {
        unsafe {
            SetWindowPos(
                self.hwnd,
                None,
                0,
                0,
                width.round() as i32,
                height.round() as i32,
                SWP_NOMOVE | SWP_NOZORDER | SWP_NOACTIVATE,
            )
        }
        .map_err(|e| SurfaceError::Resize(e.to_string()))
    }

    fn set_position(&mut self, x: f32, y: f32) -> Result<(), SurfaceError> {
        unsafe {
            SetWindowPos(
                self.hwnd,
                None,
                x.round() as i32,
                y.round() as i32,
                0,
                0,
                SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            )
        }
        .map_err(|e| SurfaceError::Reposition(e.to_string()))
    }

    fn position(&self) -> Result<(f32, f32), SurfaceError> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(self.hwnd, &mut rect) }
            .map_err(|e| SurfaceError::Reposition(e.to_string()))?;
        Ok((rect.left as f32, rect.top as f32))
    }

    fn set_menu_visible(&mut self, visible: bool) -> Result<(), SurfaceError> {
        self.menu_visible = visible;
        unsafe {
            let _ = InvalidateRect(Some(self.hwnd), None, true);
        }
        Ok(())
    }
}

// ============================================================================
// Radial menu layout
// ============================================================================

/// Pixel placement of the expanded menu, derived from the footprint side.
#[derive(Debug, Clone, Copy)]
struct MenuLayout {
    /// Side length of the expanded footprint.
    side: f32,
    /// Radius of the central grab handle.
    handle_radius: f32,
    /// Distance from center to the action button centers.
    ring_radius: f32,
    /// Radius of one action button.
    button_radius: f32,
    /// Radius of the close button in the top-right corner.
    close_radius: f32,
}

impl MenuLayout {
    fn for_side(side: f32) -> Self {
        Self {
            side,
            handle_radius: side * 0.13,
            ring_radius: side * 0.34,
            button_radius: side * 0.11,
            close_radius: side * 0.07,
        }
    }

    fn center(&self) -> (f32, f32) {
        (self.side / 2.0, self.side / 2.0)
    }

    /// Centers of the four action buttons, one per binding, laid out
    /// clockwise from the top.
    fn buttons(&self) -> [(ShortcutAction, f32, f32); 4] {
        let (cx, cy) = self.center();
        let r = self.ring_radius;
        let ring = [(0.0, -r), (r, 0.0), (0.0, r), (-r, 0.0)];

        let mut placed = [(ShortcutAction::VoiceInput, 0.0, 0.0); 4];
        for (i, binding) in crate::shortcuts::BINDINGS.iter().take(4).enumerate() {
            let (dx, dy) = ring[i];
            placed[i] = (binding.action, cx + dx, cy + dy);
        }
        placed
    }

    fn close_center(&self) -> (f32, f32) {
        let inset = self.close_radius * 1.8;
        (self.side - inset, inset)
    }
}

/// What an expanded-menu click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuHit {
    Action(ShortcutAction),
    Close,
    /// The central handle or the disc: handled as a gesture.
    Handle,
}

fn within(x: f32, y: f32, cx: f32, cy: f32, radius: f32) -> bool {
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= radius * radius
}

fn hit_test(layout: &MenuLayout, x: f32, y: f32) -> MenuHit {
    let (cx, cy) = layout.close_center();
    if within(x, y, cx, cy, layout.close_radius) {
        return MenuHit::Close;
    }
    for (action, bx, by) in layout.buttons() {
        if within(x, y, bx, by, layout.button_radius) {
            return MenuHit::Action(action);
        }
    }
    MenuHit::Handle
}

// ============================================================================
// Shell
// ============================================================================

struct ShellState {
    widget: Widget<Win32Surface, SendInputSink>,
    layout: MenuLayout,
}

/// Shows the startup failure dialog. Runtime failures never reach the user;
/// only a broken initialization does.
pub fn show_init_error(message: &str) {
    let text: Vec<u16> = message.encode_utf16().chain(std::iter::once(0)).collect();
    unsafe {
        MessageBoxW(
            None,
            PCWSTR(text.as_ptr()),
            w!("TouchFuture"),
            MB_OK | MB_ICONERROR,
        );
    }
}

/// Creates the overlay window and runs the message loop until the window is
/// destroyed. Returns an error only for initialization failures.
pub fn run(config: &Config) -> windows::core::Result<()> {
    unsafe {
        let instance = GetModuleHandleW(None)?;
        let class_name = w!("TouchFutureOverlay");

        let wc = WNDCLASSW {
            lpfnWndProc: Some(wndproc),
            hInstance: instance.into(),
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            lpszClassName: class_name,
            hbrBackground: HBRUSH(GetStockObject(NULL_BRUSH).0),
            ..Default::default()
        };
        let atom = RegisterClassW(&wc);
        debug_assert!(atom != 0);

        // Collapsed footprint, centered on the primary monitor
        let side = config.collapsed_size.round() as i32;
        let x = (GetSystemMetrics(SM_CXSCREEN) - side) / 2;
        let y = (GetSystemMetrics(SM_CYSCREEN) - side) / 2;

        let hwnd = CreateWindowExW(
            WS_EX_LAYERED | WS_EX_TOPMOST | WS_EX_TOOLWINDOW,
            class_name,
            w!("TouchFuture"),
            WS_POPUP | WS_VISIBLE,
            x,
            y,
            side,
            side,
            None,
            None,
            Some(instance.into()),
            None,
        )?;

        SetLayeredWindowAttributes(hwnd, KEY_CLR, 0, LWA_COLORKEY)?;

        let state = Box::new(ShellState {
            widget: Widget::new(Win32Surface::new(hwnd), SendInputSink, config),
            layout: MenuLayout::for_side(config.expanded_size),
        });
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, Box::into_raw(state) as isize);

        let interval = app_settings::TICK_INTERVAL_MS as u32;
        let timer = SetTimer(Some(hwnd), TICK_TIMER, interval, None);
        debug_assert!(timer != 0);

        tracing::info!("overlay window created at ({}, {})", x, y);

        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).into() {
            DispatchMessageW(&msg);
        }
        Ok(())
    }
}

fn get_state(hwnd: HWND) -> Option<&'static mut ShellState> {
    unsafe {
        let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut ShellState;
        if ptr.is_null() { None } else { Some(&mut *ptr) }
    }
}

fn cursor_point(lparam: LPARAM) -> Point {
    let x = (lparam.0 & 0xFFFF) as i16 as i32;
    let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;
    Point::new(x as f32, y as f32)
}

extern "system" fn wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_LBUTTONDOWN => {
                if let Some(state) = get_state(hwnd) {
                    let point = cursor_point(lparam);
                    if state.widget.menu_state() == MenuState::Expanded {
                        match hit_test(&state.layout, point.x, point.y) {
                            MenuHit::Action(action) => {
                                state.widget.activate(action, Instant::now());
                                let _ = InvalidateRect(Some(hwnd), None, true);
                                return LRESULT(0);
                            }
                            MenuHit::Close => {
                                state.widget.close_menu();
                                let _ = InvalidateRect(Some(hwnd), None, true);
                                return LRESULT(0);
                            }
                            MenuHit::Handle => {}
                        }
                    }
                    SetCapture(hwnd);
                    state.widget.pointer_down(PointerKind::Mouse, point);
                }
                LRESULT(0)
            }
            WM_MOUSEMOVE => {
                if GetCapture() == hwnd {
                    if let Some(state) = get_state(hwnd) {
                        state.widget.pointer_move(cursor_point(lparam));
                    }
                }
                LRESULT(0)
            }
            WM_LBUTTONUP => {
                if GetCapture() == hwnd {
                    let _ = ReleaseCapture();
                    if let Some(state) = get_state(hwnd) {
                        state.widget.pointer_up(Instant::now());
                        let _ = InvalidateRect(Some(hwnd), None, true);
                    }
                }
                LRESULT(0)
            }
            WM_TIMER => {
                if wparam.0 == TICK_TIMER {
                    if let Some(state) = get_state(hwnd) {
                        let was_expanded = state.widget.menu_state() == MenuState::Expanded;
                        state.widget.tick(Instant::now());
                        if was_expanded && state.widget.menu_state() == MenuState::Collapsed {
                            let _ = InvalidateRect(Some(hwnd), None, true);
                        }
                    }
                }
                LRESULT(0)
            }
            WM_PAINT => {
                if let Some(state) = get_state(hwnd) {
                    paint(hwnd, state);
                }
                LRESULT(0)
            }
            WM_DESTROY => {
                let _ = KillTimer(Some(hwnd), TICK_TIMER);
                let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut ShellState;
                if !ptr.is_null() {
                    SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
                    drop(Box::from_raw(ptr));
                }
                PostQuitMessage(0);
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}

unsafe fn fill_circle(hdc: windows::Win32::Graphics::Gdi::HDC, cx: f32, cy: f32, r: f32, color: COLORREF) {
    unsafe {
        let brush = CreateSolidBrush(color);
        let old = SelectObject(hdc, brush.into());
        let _ = Ellipse(
            hdc,
            (cx - r).round() as i32,
            (cy - r).round() as i32,
            (cx + r).round() as i32,
            (cy + r).round() as i32,
        );
        let _ = SelectObject(hdc, old);
        let _ = DeleteObject(brush.into());
    }
}

unsafe fn paint(hwnd: HWND, state: &ShellState) {
    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);
        let mut rc = RECT::default();
        let _ = GetClientRect(hwnd, &mut rc);

        // Everything magenta is keyed out by the layered attribute
        let bg = CreateSolidBrush(KEY_CLR);
        FillRect(hdc, &rc, bg);
        let _ = DeleteObject(bg.into());

        let width = rc.right as f32;
        let cx = width / 2.0;
        let cy = rc.bottom as f32 / 2.0;

        if state.widget.surface().menu_visible() {
            let layout = &state.layout;
            fill_circle(hdc, cx, cy, width / 2.0, DISC_CLR);
            for (_, bx, by) in layout.buttons() {
                fill_circle(hdc, bx, by, layout.button_radius, BTN_CLR);
            }
            let (kx, ky) = layout.close_center();
            fill_circle(hdc, kx, ky, layout.close_radius, CLOSE_CLR);
            fill_circle(hdc, cx, cy, layout.handle_radius, DOT_CLR);
        } else {
            // Collapsed: just the grab dot
            fill_circle(hdc, cx, cy, width * 0.45, DOT_CLR);
        }

        let _ = EndPaint(hwnd, &ps);
    }
}
