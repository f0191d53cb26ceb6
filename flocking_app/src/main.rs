extern crate nannou;
use std::fmt::Display;

use clap_serde_derive::clap::Parser;
use flocking_lib::boid::Boid;
use flocking_lib::flock::Flock;
use flocking_lib::options::{RunOptions, WindowSize};
use nannou::prelude::*;
use nannou_egui::{egui, Egui};

mod cliargs;
use cliargs::{get_run_options, Args};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    nannou::app(model).update(update).run();
}

struct ControlsState {
    execution_paused: bool,
    controls_open: bool,
    restart_requested: bool,
}

struct Model {
    egui: Egui,
    flock: Flock,
    run_options: RunOptions,
    last_update_micros: u128,
    since_last_update_micros: u128,
    control_state: ControlsState,
}

fn exit_with(err: impl Display) -> ! {
    log::error!("{}", err);
    std::process::exit(2)
}

fn model(app: &App) -> Model {
    // Parse whole args with clap, then merge in the config file
    let mut args = Args::parse();
    let run_options = get_run_options(&mut args).unwrap_or_else(|err| exit_with(err));

    let main_window = app
        .new_window()
        .key_pressed(key_pressed)
        .closed(window_closed)
        .size(
            run_options.window.win_w as u32,
            run_options.window.win_h as u32,
        )
        .title("boids flocking")
        .raw_event(raw_window_event)
        .view(view)
        .build()
        .unwrap_or_else(|err| exit_with(format!("can't open window: {:?}", err)));

    let egui = match app.window(main_window) {
        Some(window) => Egui::from_window(&window),
        None => exit_with("main window vanished before it was set up"),
    };

    Model {
        egui,
        flock: Flock::new(&run_options),
        run_options,
        last_update_micros: 0,
        since_last_update_micros: 0,
        control_state: ControlsState {
            execution_paused: false,
            controls_open: false,
            restart_requested: false,
        },
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    record_update_timing(app, model);

    let Model {
        ref mut egui,
        ref mut flock,
        ref run_options,
        ref mut control_state,
        since_last_update_micros,
        ..
    } = *model;

    let ControlsState {
        ref mut execution_paused,
        ref mut controls_open,
        ref mut restart_requested,
    } = *control_state;

    egui.set_elapsed_time(update.since_start);
    let ctx = egui.begin_frame();
    egui::Window::new("flock")
        .default_size(egui::vec2(0.0, 120.0))
        .open(controls_open)
        .show(&ctx, |ui| {
            ui.label(format!("No. boids: {n:>3}", n = flock.len()));
            ui.label(format!("No. ticks: {t:>3}", t = flock.tick()));
            ui.label(format!(
                "Time since last update: {t:2.2}",
                t = since_last_update_micros as f64 / 1000.
            ));

            ui.separator();

            ui.horizontal(|ui| {
                ui.checkbox(execution_paused, "paused");
                if ui.button("restart").clicked() {
                    *restart_requested = true;
                }
            });
        });
    drop(ctx);

    if *restart_requested {
        *restart_requested = false;
        flock.restart(run_options);
    }

    if *execution_paused {
        return;
    }

    flock.update(run_options);
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

fn record_update_timing(app: &App, model: &mut Model) {
    let micros_now = app.duration.since_start.as_micros();
    model.since_last_update_micros = micros_now - model.last_update_micros;
    model.last_update_micros = micros_now;
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // pause the whole simulation
        Key::Space => {
            model.control_state.execution_paused = !model.control_state.execution_paused
        }
        // show/hide controls
        Key::C => model.control_state.controls_open = !model.control_state.controls_open,
        // restart the flock, not the simulation
        Key::R => model.flock.restart(&model.run_options),
        _ => {}
    }
}

fn window_closed(_app: &App, model: &mut Model) {
    log::info!("window closed after {} ticks", model.flock.tick());
}

/// Maps canvas coordinates (origin top left, y down) to nannou's centred ones
fn canvas_to_world(position: (f32, f32), window: &WindowSize) -> (f32, f32) {
    (position.0 - window.win_w / 2., window.win_h / 2. - position.1)
}

pub trait Drawable {
    fn draw(&self, draw: &Draw, run_options: &RunOptions);
}

impl Drawable for Flock {
    fn draw(&self, draw: &Draw, run_options: &RunOptions) {
        for b in self.view().iter() {
            b.draw(draw, run_options);
        }
    }
}

impl Drawable for Boid {
    fn draw(&self, draw: &Draw, run_options: &RunOptions) {
        let (x, y) = canvas_to_world(
            (self.position.x, self.position.y),
            &run_options.window,
        );

        draw.ellipse()
            .x_y(x, y)
            .w_h(run_options.size, run_options.size)
            .rgba(0.5, 0.5, 0.5, 0.5)
            .stroke(rgb(0.78_f32, 0.78, 0.78))
            .stroke_weight(1.0);
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    draw.background().color(rgb(0.2_f32, 0.2, 0.2));

    model.flock.draw(&draw, &model.run_options);

    if let Err(err) = draw.to_frame(app, &frame) {
        log::error!("failed to draw flock: {:?}", err);
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        log::error!("failed to draw controls: {:?}", err);
    }
}

#[cfg(test)]
mod tests {
    use flocking_lib::options::get_window_size;

    use super::canvas_to_world;

    #[test]
    fn canvas_corners_map_to_window_corners() {
        let window = get_window_size(800, 400);

        assert_eq!(canvas_to_world((0., 0.), &window), (-400., 200.));
        assert_eq!(canvas_to_world((800., 400.), &window), (400., -200.));
        assert_eq!(canvas_to_world((400., 200.), &window), (0., 0.));
    }
}
