use crate::config::{self, WindowConfig};
use crate::events::AppEvent;
use crate::gui::surface::CairoSurface;
use crate::gui::theme::{self, Theme};
use dialcore::geometry::{Point, Size};
use dialcore::protocol::Command;
use dialcore::render;
use dialcore::{Dial, Frame};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

pub struct AppModel {
    pub dial: Rc<RefCell<Dial>>,
    pub ticking: Rc<Cell<bool>>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Pointer(Point),
    Command(Command),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Command(command) => AppMsg::Command(command),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Dial, async_channel::Receiver<AppEvent>, WindowConfig);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some(&window.title),
            set_default_size: (window.width, window.height),
            add_css_class: "degree-window",

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "degree-drawing-area",

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::Pointer(Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::Pointer(Point::new(x + dx, y + dy)));
                        }
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (dial, rx, window) = init;

        theme::load_css();

        let model = AppModel {
            dial: Rc::new(RefCell::new(dial)),
            ticking: Rc::new(Cell::new(false)),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let dial_draw = model.dial.clone();
        let theme = Theme::default();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                let dial = dial_draw.borrow();
                let commands = dial.render(Size::new(width as f64, height as f64));
                let mut surface = CairoSurface::new(cr, &theme, &dial.config().metrics);
                if let Err(e) = render::replay(&commands, &mut surface) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let now = Instant::now();
        match msg {
            AppMsg::Pointer(point) => {
                let size = Size::new(
                    self.drawing_area.width() as f64,
                    self.drawing_area.height() as f64,
                );
                let action = self.dial.borrow_mut().pointer(point, size, now);
                self.apply(action.frame);
            }
            AppMsg::Command(Command::Set(value)) => {
                let frame = self.dial.borrow_mut().animate_to(value, now);
                self.apply(frame);
            }
            AppMsg::Command(Command::Reset) => {
                let initial = self.dial.borrow().config().initial_value;
                let frame = self.dial.borrow_mut().animate_to(initial, now);
                self.apply(frame);
            }
            // answered by the socket server
            AppMsg::Command(Command::Get) => {}
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let result = self.dial.borrow_mut().reconfigure(new_config.dial);
                    match result {
                        Ok(()) => {
                            self.drawing_area.queue_draw();
                            log::info!("Configuration reloaded");
                        }
                        Err(e) => log::error!("Rejected reloaded dial config: {}", e),
                    }
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn apply(&self, frame: Frame) {
        if frame.should_redraw {
            self.drawing_area.queue_draw();
        }
        if frame.animating {
            self.start_ticking();
        }
    }

    /// Drives the running transition from the frame clock until it settles.
    fn start_ticking(&self) {
        if self.ticking.replace(true) {
            return;
        }
        let dial = self.dial.clone();
        let ticking = self.ticking.clone();
        self.drawing_area.add_tick_callback(move |area, _| {
            let frame = dial.borrow_mut().advance(Instant::now());
            if frame.should_redraw {
                area.queue_draw();
            }
            if frame.animating {
                glib::ControlFlow::Continue
            } else {
                ticking.set(false);
                glib::ControlFlow::Break
            }
        });
    }
}
