use macroquad::prelude::*;
use particle_burst::draw::unpack_rgb;
use particle_burst::Canvas;
use particle_burst::DrawPrimitive;
use particle_burst::ParticleField;
use particle_burst::PointerState;
use particle_burst::Settings;
use particle_burst::Shape;
use particle_burst::BACKGROUND;
use particle_burst::NOMINAL_FPS;
use particle_burst::VIEW_SIZE;
use tracing::error;
use tracing::info;

const FONT_SIZE: u16 = 28;

fn window_conf() -> Conf {
    Conf {
        window_title: "Particle Burst".to_owned(),
        window_width: VIEW_SIZE as i32,
        window_height: VIEW_SIZE as i32,
        sample_count: 4,
        ..Default::default()
    }
}

fn to_color(packed: u32, alpha: f32) -> Color {
    let rgb = unpack_rgb(packed).into_format::<f32>();
    Color::new(rgb.red, rgb.green, rgb.blue, alpha.clamp(0.0, 1.0))
}

/// Draws particle primitives straight to the screen.
struct Screen;

impl Canvas for Screen {
    fn draw(&mut self, primitive: &DrawPrimitive) {
        let color = to_color(primitive.fill, primitive.alpha);
        let pos = primitive.position;

        match primitive.shape {
            Shape::Disc { .. } => draw_circle(pos.x, pos.y, primitive.scaled_radius(), color),
            Shape::Box { .. } => {
                if let Some((corner, size)) = primitive.box_rect() {
                    draw_rectangle(corner.x, corner.y, size.x, size.y, color);
                }
            }
            Shape::Star { .. } => {
                if let Some(outline) = primitive.star_vertices() {
                    // Stars are star-shaped around their center, so a fan from there covers them.
                    let center = vec2(pos.x, pos.y);
                    for (i, a) in outline.iter().enumerate() {
                        let b = outline[(i + 1) % outline.len()];
                        draw_triangle(center, vec2(a.x, a.y), vec2(b.x, b.y), color);
                    }
                }
            }
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut field = match ParticleField::new(Settings::classic()) {
        Ok(field) => field,
        Err(e) => {
            error!("failed to create particle field: {}", e);
            return;
        }
    };
    let mut pointer = PointerState::new();
    let mut rng = ::rand::thread_rng();
    let mut screen = Screen;

    info!("click and drag to spawn particles");

    loop {
        clear_background(to_color(BACKGROUND, 1.0));

        let button = format!("Shape:{}", field.shape().label());
        let button_size = measure_text(&button, None, FONT_SIZE, 1.0);
        let (x, y) = mouse_position();
        let on_button = x < button_size.width && y < button_size.height;

        if is_mouse_button_pressed(MouseButton::Left) {
            if on_button {
                let next = field.shape().next();
                if let Err(e) = field.set_shape(next) {
                    error!("couldn't switch to {:?}: {}", next, e);
                }
            } else {
                pointer.press();
            }
        }
        if is_mouse_button_released(MouseButton::Left) {
            pointer.release(x, y);
        } else {
            pointer.move_to(x, y);
        }

        let delta = get_frame_time() * NOMINAL_FPS;
        field.tick(delta, pointer.snapshot(), &mut screen, &mut rng);

        let count = field.len().to_string();
        draw_text(
            &count,
            VIEW_SIZE / 2.0,
            VIEW_SIZE / 2.0,
            FONT_SIZE as f32,
            WHITE,
        );
        draw_text(
            &button,
            0.0,
            button_size.offset_y,
            FONT_SIZE as f32,
            WHITE,
        );

        next_frame().await;
    }
}
