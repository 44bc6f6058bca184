//! Line-based parser for the text model format.
//!
//! ```text
//! # comment
//! title <text>
//! sphere <name> <cx> <cy> <cz> <r>
//! cuboid <name> <min x y z> <max x y z>
//! cylinder <name> <base x y z> <radius> <height>
//! halfspace <name> <nx> <ny> <nz> <d>
//! comb <name> [color <r> <g> <b>]
//!   u <member> [at <x> <y> <z>]
//!   - <member> [at <x> <y> <z>]
//!   + <member> [at <x> <y> <z>]
//! end
//! ```

use std::str::SplitWhitespace;

use super::{
    BoolOp, Combination, Cuboid, Cylinder, Database, Halfspace, Member, Object, Primitive, Sphere,
};
use crate::error::DatabaseError;
use crate::math::{Matrix4, Point3, Vector3};

pub fn parse(text: &str) -> Result<Database, DatabaseError> {
    let mut db = Database::new();
    let mut lines = text.lines().enumerate();

    while let Some((idx, raw)) = lines.next() {
        let line_no = idx + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        match keyword {
            "title" => {
                let rest = line.strip_prefix("title").unwrap_or_default().trim();
                db.set_title(rest);
            }
            "sphere" => {
                let name = parse_name(&mut tokens, line_no)?;
                let center = parse_point(&mut tokens, line_no)?;
                let radius = parse_number(&mut tokens, line_no)?;
                expect_end(&mut tokens, line_no)?;
                db.add_object(
                    &name,
                    Object::Primitive(Primitive::Sphere(Sphere { center, radius })),
                )?;
            }
            "cuboid" => {
                let name = parse_name(&mut tokens, line_no)?;
                let min = parse_point(&mut tokens, line_no)?;
                let max = parse_point(&mut tokens, line_no)?;
                expect_end(&mut tokens, line_no)?;
                db.add_object(
                    &name,
                    Object::Primitive(Primitive::Cuboid(Cuboid { min, max })),
                )?;
            }
            "cylinder" => {
                let name = parse_name(&mut tokens, line_no)?;
                let base = parse_point(&mut tokens, line_no)?;
                let radius = parse_number(&mut tokens, line_no)?;
                let height = parse_number(&mut tokens, line_no)?;
                expect_end(&mut tokens, line_no)?;
                db.add_object(
                    &name,
                    Object::Primitive(Primitive::Cylinder(Cylinder {
                        base,
                        radius,
                        height,
                    })),
                )?;
            }
            "halfspace" => {
                let name = parse_name(&mut tokens, line_no)?;
                let normal = parse_vector(&mut tokens, line_no)?;
                let distance = parse_number(&mut tokens, line_no)?;
                expect_end(&mut tokens, line_no)?;
                db.add_object(
                    &name,
                    Object::Primitive(Primitive::Halfspace(Halfspace { normal, distance })),
                )?;
            }
            "comb" => {
                let name = parse_name(&mut tokens, line_no)?;
                let mut comb = Combination::default();
                if let Some(tok) = tokens.next() {
                    if tok != "color" {
                        return Err(parse_err(line_no, format!("unexpected token: {tok}")));
                    }
                    let r = parse_number(&mut tokens, line_no)?;
                    let g = parse_number(&mut tokens, line_no)?;
                    let b = parse_number(&mut tokens, line_no)?;
                    expect_end(&mut tokens, line_no)?;
                    comb.color = Some([r, g, b]);
                }

                let mut terminated = false;
                for (body_idx, body_raw) in lines.by_ref() {
                    let body_no = body_idx + 1;
                    let body = strip_comment(body_raw).trim();
                    if body.is_empty() {
                        continue;
                    }
                    if body == "end" {
                        terminated = true;
                        break;
                    }
                    comb.members.push(parse_member(body, body_no)?);
                }
                if !terminated {
                    return Err(parse_err(line_no, "unterminated combination".to_owned()));
                }
                db.add_object(&name, Object::Combination(comb))?;
            }
            other => {
                return Err(parse_err(line_no, format!("unknown directive: {other}")));
            }
        }
    }

    Ok(db)
}

fn parse_member(line: &str, line_no: usize) -> Result<Member, DatabaseError> {
    let mut tokens = line.split_whitespace();
    let op = match tokens.next() {
        Some("u") => BoolOp::Union,
        Some("-") => BoolOp::Subtract,
        Some("+") => BoolOp::Intersect,
        other => {
            return Err(parse_err(
                line_no,
                format!("expected member operator (u, - or +), got {other:?}"),
            ));
        }
    };
    let name = parse_name(&mut tokens, line_no)?;
    let transform = match tokens.next() {
        None => Matrix4::identity(),
        Some("at") => {
            let offset = parse_vector(&mut tokens, line_no)?;
            expect_end(&mut tokens, line_no)?;
            Matrix4::new_translation(&offset)
        }
        Some(tok) => return Err(parse_err(line_no, format!("unexpected token: {tok}"))),
    };
    Ok(Member {
        op,
        name,
        transform,
    })
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(head, _)| head)
}

fn parse_err(line: usize, message: String) -> DatabaseError {
    DatabaseError::Parse { line, message }
}

fn parse_name(tokens: &mut SplitWhitespace<'_>, line: usize) -> Result<String, DatabaseError> {
    tokens
        .next()
        .map(str::to_owned)
        .ok_or_else(|| parse_err(line, "expected object name".to_owned()))
}

fn parse_number(tokens: &mut SplitWhitespace<'_>, line: usize) -> Result<f64, DatabaseError> {
    let tok = tokens
        .next()
        .ok_or_else(|| parse_err(line, "expected a number".to_owned()))?;
    tok.parse()
        .map_err(|_| parse_err(line, format!("invalid number: {tok}")))
}

fn parse_point(tokens: &mut SplitWhitespace<'_>, line: usize) -> Result<Point3, DatabaseError> {
    let x = parse_number(tokens, line)?;
    let y = parse_number(tokens, line)?;
    let z = parse_number(tokens, line)?;
    Ok(Point3::new(x, y, z))
}

fn parse_vector(tokens: &mut SplitWhitespace<'_>, line: usize) -> Result<Vector3, DatabaseError> {
    let x = parse_number(tokens, line)?;
    let y = parse_number(tokens, line)?;
    let z = parse_number(tokens, line)?;
    Ok(Vector3::new(x, y, z))
}

fn expect_end(tokens: &mut SplitWhitespace<'_>, line: usize) -> Result<(), DatabaseError> {
    match tokens.next() {
        None => Ok(()),
        Some(tok) => Err(parse_err(line, format!("trailing token: {tok}"))),
    }
}
