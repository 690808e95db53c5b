//! The bongo cat. Coordinates are tuned for a 128x64 panel; anything that
//! falls off the edge is left to the target to clip.

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Ellipse, Line, PrimitiveStyle, Triangle},
};

/// Which paws to show. `Down` is drawn while any switch is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pose {
    Up,
    Down,
}

impl From<bool> for Pose {
    fn from(active: bool) -> Self {
        if active {
            Pose::Down
        } else {
            Pose::Up
        }
    }
}

fn fill(color: BinaryColor) -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_fill(color)
}

fn stroke(color: BinaryColor) -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_stroke(color, 1)
}

/// Filled disc of radius `r` around `(x, y)`.
fn disc(x: i32, y: i32, r: u32) -> Circle {
    Circle::with_center(Point::new(x, y), 2 * r + 1)
}

/// Filled ellipse with radii `rx`, `ry` around `(x, y)`.
fn oval(x: i32, y: i32, rx: u32, ry: u32) -> Ellipse {
    Ellipse::with_center(Point::new(x, y), Size::new(2 * rx + 1, 2 * ry + 1))
}

fn line(x0: i32, y0: i32, x1: i32, y1: i32) -> Line {
    Line::new(Point::new(x0, y0), Point::new(x1, y1))
}

fn triangle(p: [(i32, i32); 3]) -> Triangle {
    Triangle::new(
        Point::new(p[0].0, p[0].1),
        Point::new(p[1].0, p[1].1),
        Point::new(p[2].0, p[2].1),
    )
}

/// Draws the whole scene for `pose` on top of whatever `target` holds.
pub fn draw<D>(target: &mut D, pose: Pose) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    use BinaryColor::{Off, On};

    // table
    line(0, 63, 128, 63).into_styled(stroke(On)).draw(target)?;

    // head, then a wider one underneath for the outline
    disc(64, 64, 25).into_styled(fill(On)).draw(target)?;
    disc(64, 70, 30).into_styled(fill(On)).draw(target)?;

    // eyes and mouth are cut out of the face
    disc(54, 55, 2).into_styled(fill(Off)).draw(target)?;
    disc(74, 55, 2).into_styled(fill(Off)).draw(target)?;
    line(64, 58, 62, 60).into_styled(stroke(Off)).draw(target)?;
    line(64, 58, 66, 60).into_styled(stroke(Off)).draw(target)?;

    triangle([(38, 50), (45, 30), (52, 48)])
        .into_styled(fill(On))
        .draw(target)?;
    triangle([(76, 48), (83, 30), (90, 50)])
        .into_styled(fill(On))
        .draw(target)?;

    match pose {
        Pose::Down => {
            oval(40, 60, 8, 5).into_styled(fill(On)).draw(target)?;
            oval(88, 60, 8, 5).into_styled(fill(On)).draw(target)?;

            // impact marks
            line(30, 55, 35, 60).into_styled(stroke(On)).draw(target)?;
            line(98, 55, 93, 60).into_styled(stroke(On)).draw(target)?;
        }
        Pose::Up => {
            oval(35, 40, 6, 6).into_styled(fill(On)).draw(target)?;
            oval(93, 40, 6, 6).into_styled(fill(On)).draw(target)?;
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "bongo_test.rs"]
mod test;
