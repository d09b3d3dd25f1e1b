//
// radontool - Radon transform and filtered backprojection
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Point and rectangle structs and operations.
//!

use std::ops::{Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32
}

impl Sub for Point {
    type Output = Point;

    fn sub(mut self, other: Point) -> Point {
        self -= other;
        self
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, other: Point) {
        *self = Point {
            x: self.x - other.x,
            y: self.y - other.y,
        };
    }
}

impl Point {
    /// Squared distance from (0, 0).
    pub fn sqr_dist(&self) -> i64 {
        (self.x as i64).pow(2) + (self.y as i64).pow(2)
    }

    pub fn zero() -> Point { Point{ x: 0, y: 0 } }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32
}

impl Rect {
    pub fn get_pos(&self) -> Point { Point{ x: self.x, y: self.y } }

    /// Returns the common part of `self` and `other`, or `None` if they do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x_start = self.x.max(other.x);
        let y_start = self.y.max(other.y);
        let x_end = (self.x + self.width as i32).min(other.x + other.width as i32);
        let y_end = (self.y + self.height as i32).min(other.y + other.height as i32);

        if x_end <= x_start || y_end <= y_start {
            None
        } else {
            Some(Rect{ x: x_start, y: y_start, width: (x_end - x_start) as u32, height: (y_end - y_start) as u32 })
        }
    }
}
