//! XML scene files.
//!
//! ```xml
//! <world>
//!     <camera>
//!         <position x="10" y="10" z="10" />
//!         <lookAt x="0" y="0" z="0" />
//!         <up x="0" y="1" z="0" />
//!         <projection fov="60" near="1" far="1000" />
//!     </camera>
//!     <group>
//!         <transform>
//!             <translate time="10" align="True">
//!                 <point x="5" y="0" z="0" />
//!                 ...
//!             </translate>
//!             <rotate time="4" x="0" y="1" z="0" />
//!             <scale x="2" y="2" z="2" />
//!         </transform>
//!         <models>
//!             <model file="sphere.3d" />
//!         </models>
//!         <group> ... </group>
//!     </group>
//! </world>
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use cgmath::{EuclideanSpace, Point3, Vector3};
use log::{debug, info};
use roxmltree::{Document, Node};

use super::error::ParseError;
use super::model::ModelCache;
use crate::animation::CatmullRom;
use crate::config::{AttributePolicy, ParseOptions};
use crate::gfx::camera::{Camera, Projection};
use crate::gfx::scene::{DynamicTranslate, Group, Model, Transform, World};

/// Reads and parses the scene file at `path`.
///
/// Model files are resolved relative to the directory holding `path`.
pub fn parse_world(path: impl AsRef<Path>, options: &ParseOptions) -> Result<World, ParseError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut cache = ModelCache::new();
    let world = parse_world_str(&text, base_dir, options, &mut cache)?;

    let stats = world.statistics();
    info!(
        "Loaded {}: {} groups, {} models ({} files), {} vertices",
        path.display(),
        stats.group_count,
        stats.model_count,
        cache.len(),
        stats.total_vertices
    );
    Ok(world)
}

/// Parses scene XML held in memory.
pub fn parse_world_str(
    text: &str,
    base_dir: &Path,
    options: &ParseOptions,
    cache: &mut ModelCache,
) -> Result<World, ParseError> {
    let doc = Document::parse(text)?;

    let world_node = doc
        .root()
        .children()
        .find(|n| n.has_tag_name("world"))
        .ok_or(ParseError::NoWorldNode)?;
    let camera_node = first_child(world_node, "camera").ok_or(ParseError::NoCameraNode)?;
    let group_node = first_child(world_node, "group").ok_or(ParseError::NoGroupNode)?;

    let mut parser = SceneParser {
        base_dir,
        policy: options.attribute_policy,
        cache,
    };
    let camera = parser.camera(camera_node)?;
    let root = parser.group(group_node)?;
    Ok(World::new(camera, root))
}

fn first_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

struct SceneParser<'p> {
    base_dir: &'p Path,
    policy: AttributePolicy,
    cache: &'p mut ModelCache,
}

impl SceneParser<'_> {
    fn number<T: FromStr + Default>(&self, node: Node, attribute: &str) -> Result<T, ParseError> {
        let malformed = || ParseError::MalformedNumber {
            node: node.tag_name().name().to_string(),
            attribute: attribute.to_string(),
        };
        match node.attribute(attribute) {
            Some(value) => value.trim().parse().map_err(|_| malformed()),
            None => match self.policy {
                AttributePolicy::Strict => Err(malformed()),
                AttributePolicy::Lenient => Ok(T::default()),
            },
        }
    }

    fn xyz(&self, node: Node) -> Result<Vector3<f32>, ParseError> {
        Ok(Vector3::new(
            self.number(node, "x")?,
            self.number(node, "y")?,
            self.number(node, "z")?,
        ))
    }

    fn camera(&self, node: Node) -> Result<Camera, ParseError> {
        let pos = first_child(node, "position").ok_or(ParseError::NoCameraPosition)?;
        let lookat = first_child(node, "lookAt").ok_or(ParseError::NoCameraLookAt)?;
        let up = first_child(node, "up").ok_or(ParseError::NoCameraUp)?;
        let projection = first_child(node, "projection").ok_or(ParseError::NoCameraProjection)?;

        Ok(Camera::new(
            self.xyz(pos)?,
            self.xyz(lookat)?,
            self.xyz(up)?,
            Projection {
                fov: self.number(projection, "fov")?,
                near: self.number(projection, "near")?,
                far: self.number(projection, "far")?,
            },
        ))
    }

    fn group(&mut self, node: Node) -> Result<Group, ParseError> {
        let mut group = Group::new();
        for child in elements(node) {
            match child.tag_name().name() {
                "transform" => {
                    for transform in elements(child) {
                        group.transforms.push(self.transform(transform)?);
                    }
                }
                "models" => {
                    for model in elements(child) {
                        group.models.push(self.model(model)?);
                    }
                }
                "group" => group.children.push(self.group(child)?),
                other => return Err(ParseError::UnknownGroupChild(other.to_string())),
            }
        }
        Ok(group)
    }

    fn transform(&self, node: Node) -> Result<Transform, ParseError> {
        match node.tag_name().name() {
            "translate" => self.translate(node),
            "rotate" => {
                let axis = self.xyz(node)?;
                if node.has_attribute("time") {
                    Ok(Transform::rotate_time(self.number(node, "time")?, axis))
                } else {
                    Ok(Transform::rotate_angle(self.number(node, "angle")?, axis))
                }
            }
            "scale" => Ok(Transform::Scale(self.xyz(node)?)),
            other => Err(ParseError::UnknownTransform(other.to_string())),
        }
    }

    fn translate(&self, node: Node) -> Result<Transform, ParseError> {
        if !node.has_attribute("time") {
            return Ok(Transform::StaticTranslate(self.xyz(node)?));
        }

        let time: u32 = self.number(node, "time")?;
        let align = match node.attribute("align") {
            Some("True") => true,
            Some("False") => false,
            Some(other) => return Err(ParseError::UnknownTranslateAlign(other.to_string())),
            None => return Err(ParseError::NoTranslateAlign),
        };

        let points = elements(node)
            .map(|point| self.xyz(point).map(Point3::from_vec))
            .collect::<Result<Vec<_>, _>>()?;
        let curve = CatmullRom::new(points)?;
        debug!(
            "Dynamic translate: {} points, {}s loop, align={}",
            curve.points().len(),
            time,
            align
        );
        Ok(Transform::DynamicTranslate(DynamicTranslate::new(time, align, curve)))
    }

    fn model(&mut self, node: Node) -> Result<Model, ParseError> {
        let file = node.attribute("file").ok_or(ParseError::NoModelFilename)?;
        let mesh = self.cache.load(&self.base_dir.join(file))?;
        Ok(Model::new(file, mesh))
    }
}
