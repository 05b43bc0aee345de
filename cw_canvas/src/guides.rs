use cw_core::{Direction, RasterSize};
use serde::Serialize;

use crate::configuration::DrawConfiguration;
use crate::touch::InteractionMode;

/// Faint shapes drawn over the board to show how touch input is read.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum GuideShape {
    Line {
        from: (f32, f32),
        to: (f32, f32),
        stroke: String,
        opacity: f32,
    },
    Circle {
        center: (f32, f32),
        radius: f32,
        stroke: String,
        opacity: f32,
    },
    Arrow {
        from: (f32, f32),
        direction: Direction,
        length: f32,
        stroke: String,
        opacity: f32,
    },
}

/// Relative mode splits the screen in two, absolute mode marks the center
/// the quadrants are measured from. Following and unset draw nothing.
pub fn touch_guides(
    mode: Option<InteractionMode>,
    raster: RasterSize,
    config: &DrawConfiguration,
) -> Vec<GuideShape> {
    let style = config.guide();
    let stroke = style.stroke().clone();
    let opacity = style.opacity();
    match mode {
        Some(InteractionMode::Relative) => {
            let x = raster.width as f32 / 2.0;
            let height = raster.height as f32;
            vec![GuideShape::Line {
                from: (x, height / 4.0),
                to: (x, height * 3.0 / 4.0),
                stroke,
                opacity,
            }]
        }
        Some(InteractionMode::Absolute) => {
            let center = raster.center();
            let mut shapes = vec![GuideShape::Circle {
                center,
                radius: 1.0,
                stroke: stroke.clone(),
                opacity,
            }];
            shapes.extend(
                [
                    Direction::Right,
                    Direction::Down,
                    Direction::Left,
                    Direction::Up,
                ]
                .into_iter()
                .map(|direction| GuideShape::Arrow {
                    from: center,
                    direction,
                    length: style.arrow_length(),
                    stroke: stroke.clone(),
                    opacity,
                }),
            );
            shapes
        }
        Some(InteractionMode::Following) | None => Vec::new(),
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    #[test]
    fn relative_guide_is_a_center_line() {
        let shapes = touch_guides(
            Some(InteractionMode::Relative),
            RasterSize::new(400, 200),
            &DrawConfiguration::default(),
        );
        assert_eq!(
            vec![GuideShape::Line {
                from: (200.0, 50.0),
                to: (200.0, 150.0),
                stroke: "black".to_string(),
                opacity: 0.2,
            }],
            shapes
        );
    }

    #[test]
    fn absolute_guide_has_four_arrows_from_center() {
        let shapes = touch_guides(
            Some(InteractionMode::Absolute),
            RasterSize::new(300, 300),
            &DrawConfiguration::default(),
        );
        assert_eq!(5, shapes.len());
        assert_eq!(
            GuideShape::Circle {
                center: (150.0, 150.0),
                radius: 1.0,
                stroke: "black".to_string(),
                opacity: 0.2,
            },
            shapes[0]
        );
        let directions: Vec<Direction> = shapes
            .iter()
            .filter_map(|shape| match shape {
                GuideShape::Arrow {
                    from,
                    direction,
                    length,
                    ..
                } if *from == (150.0, 150.0) && *length == 20.0 => Some(*direction),
                _ => None,
            })
            .collect();
        assert_eq!(
            vec![Direction::Right, Direction::Down, Direction::Left, Direction::Up],
            directions
        );
    }

    #[test]
    fn following_and_unset_draw_nothing() {
        let config = DrawConfiguration::default();
        let raster = RasterSize::new(100, 100);
        assert!(touch_guides(Some(InteractionMode::Following), raster, &config).is_empty());
        assert!(touch_guides(None, raster, &config).is_empty());
    }
}
