//! `.obj` model loading.
//!
//! A model is read in two passes. [`parse_obj`] collects the raw vertices,
//! normals and faces exactly as the file states them (face and normal
//! numbers stay 1-based). [`Model::from_obj`] then turns that into flat
//! buffers for the pipeline, either expanded per face corner
//! ([`DrawingMethod::Arrays`]) or as the file's own vertex list plus an
//! element index buffer ([`DrawingMethod::Elements`]).
//!
//! Faces must be triangles. When the file has no normals, every face gets the
//! normalized cross product of its two edges, shared by its three corners.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use cgmath::{InnerSpace, Vector3 as Vec3, Zero};
use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::vertex::{Triangle, Vertex};

/// x/y/z per position and per normal.
pub const VERTEX_COMPONENTS: usize = 3;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to open model file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read model data: {0}")]
    Read(#[from] std::io::Error),

    #[error("model has no vertices")]
    NoVertices,

    #[error("drawing as elements requires face data, but the model has none")]
    NoFaces,

    #[error(
        "cannot set up model data: {vertices} vertices, {faces} faces, {normals} normals, {normal_indices} normal indices"
    )]
    UnsupportedLayout {
        vertices: usize,
        faces: usize,
        normals: usize,
        normal_indices: usize,
    },

    #[error("face {face} refers to {kind} {index}, but only {count} are defined")]
    IndexOutOfRange {
        face: usize,
        kind: &'static str,
        index: u32,
        count: usize,
    },

    #[error("{normal_indices} faces carry normal indices but the model has {faces} faces")]
    NormalIndexMismatch { faces: usize, normal_indices: usize },
}

/// Whether the data buffers hold duplicates (arrays) or not (elements).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingMethod {
    #[default]
    Arrays,
    Elements,
}

#[derive(Debug, Error)]
#[error("unknown drawing method `{0}`, expected `arrays` or `elements`")]
pub struct ParseDrawingMethodError(String);

impl FromStr for DrawingMethod {
    type Err = ParseDrawingMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arrays" => Ok(DrawingMethod::Arrays),
            "elements" => Ok(DrawingMethod::Elements),
            _ => Err(ParseDrawingMethodError(s.to_string())),
        }
    }
}

impl fmt::Display for DrawingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawingMethod::Arrays => f.write_str("arrays"),
            DrawingMethod::Elements => f.write_str("elements"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    VertexComponentCount,
    NormalComponentCount,
    TexCoordComponentCount,
    FaceComponentCount,
    MixedFaceFormat,
    BadNumber,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IssueKind::VertexComponentCount => "vertex data with wrong component count",
            IssueKind::NormalComponentCount => "normal data with wrong component count",
            IssueKind::TexCoordComponentCount => "texture coordinate with wrong component count",
            IssueKind::FaceComponentCount => "face data with wrong component count",
            IssueKind::MixedFaceFormat => "face mixing corners with and without normals",
            IssueKind::BadNumber => "value that is not a number",
        };
        f.write_str(text)
    }
}

/// A skipped line. The load carries on without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseIssue {
    pub line: usize,
    pub kind: IssueKind,
}

/// Raw contents of an `.obj` file.
#[derive(Debug, Clone, Default)]
pub struct ObjData {
    pub vertices: Vec<Vec3<f32>>,
    pub normals: Vec<Vec3<f32>>,
    pub tex_coords: Vec<Vec3<f32>>,
    /// 1-based vertex numbers, as written in the file.
    pub faces: Vec<[u32; 3]>,
    /// 1-based normal numbers for faces written as `f v//n v//n v//n`.
    pub normal_indices: Vec<[u32; 3]>,
    pub issues: Vec<ParseIssue>,
}

impl ObjData {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_vertices(&self) -> bool {
        !self.vertices.is_empty()
    }

    pub fn has_faces(&self) -> bool {
        !self.faces.is_empty()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_normal_indices(&self) -> bool {
        !self.normal_indices.is_empty()
    }
}

fn parse_vec3(tokens: &[&str]) -> Option<Vec3<f32>> {
    let x = tokens[0].parse().ok()?;
    let y = tokens[1].parse().ok()?;
    let z = tokens[2].parse().ok()?;
    Some(Vec3::new(x, y, z))
}

/// Splits one face corner (`v`, `v/t`, `v//n` or `v/t/n`) into its vertex
/// and optional normal number.
fn parse_corner(token: &str) -> Result<(u32, Option<u32>), IssueKind> {
    let mut fields = token.split('/');
    let vertex = fields
        .next()
        .and_then(|v| v.parse().ok())
        .ok_or(IssueKind::BadNumber)?;
    let _tex = fields.next();
    let normal = match fields.next() {
        Some("") | None => None,
        Some(n) => Some(n.parse().map_err(|_| IssueKind::BadNumber)?),
    };
    if fields.next().is_some() {
        return Err(IssueKind::BadNumber);
    }
    Ok((vertex, normal))
}

fn parse_face(tokens: &[&str]) -> Result<([u32; 3], Option<[u32; 3]>), IssueKind> {
    let mut vertices = [0; 3];
    let mut normals = [None; 3];
    for (i, token) in tokens.iter().enumerate() {
        let (v, n) = parse_corner(token)?;
        vertices[i] = v;
        normals[i] = n;
    }
    match normals {
        [Some(a), Some(b), Some(c)] => Ok((vertices, Some([a, b, c]))),
        [None, None, None] => Ok((vertices, None)),
        _ => Err(IssueKind::MixedFaceFormat),
    }
}

/// Reads `.obj` text line by line. Malformed lines are skipped and recorded
/// in [`ObjData::issues`]; only I/O failures abort the read.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<ObjData, ModelError> {
    let mut data = ObjData::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        if line.len() <= 1 {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&prefix, values)) = tokens.split_first() else {
            continue;
        };

        let outcome = match prefix {
            "v" => {
                if values.len() == 3 {
                    parse_vec3(values)
                        .map(|v| data.vertices.push(v))
                        .ok_or(IssueKind::BadNumber)
                } else {
                    Err(IssueKind::VertexComponentCount)
                }
            }
            "vn" => {
                if values.len() == 3 {
                    parse_vec3(values)
                        .map(|n| data.normals.push(n))
                        .ok_or(IssueKind::BadNumber)
                } else {
                    Err(IssueKind::NormalComponentCount)
                }
            }
            "vt" => match values.len() {
                2 => parse_vec3(&[values[0], values[1], "0"])
                    .map(|t| data.tex_coords.push(t))
                    .ok_or(IssueKind::BadNumber),
                3 => parse_vec3(values)
                    .map(|t| data.tex_coords.push(t))
                    .ok_or(IssueKind::BadNumber),
                _ => Err(IssueKind::TexCoordComponentCount),
            },
            "f" => {
                if values.len() == 3 {
                    parse_face(values).map(|(face, normals)| {
                        data.faces.push(face);
                        if let Some(normals) = normals {
                            data.normal_indices.push(normals);
                        }
                    })
                } else {
                    Err(IssueKind::FaceComponentCount)
                }
            }
            _ => Ok(()),
        };

        if let Err(kind) = outcome {
            warn!("Found {kind} at line number: {line_number} - skipping");
            data.issues.push(ParseIssue {
                line: line_number,
                kind,
            });
        }
    }

    Ok(data)
}

/// Where per-corner normals come from.
enum NormalSource {
    /// `vn` data addressed by `f v//n` normal numbers.
    Provided,
    /// Cross product of the face's two edges.
    Generated,
}

fn fetch(list: &[Vec3<f32>], number: u32, face: usize, kind: &'static str) -> Result<Vec3<f32>, ModelError> {
    number
        .checked_sub(1)
        .and_then(|i| list.get(i as usize))
        .copied()
        .ok_or(ModelError::IndexOutOfRange {
            face,
            kind,
            index: number,
            count: list.len(),
        })
}

/// `normalize(cross(v2 - v1, v3 - v1))`, or zero for a degenerate face.
pub fn face_normal(v1: Vec3<f32>, v2: Vec3<f32>, v3: Vec3<f32>) -> Vec3<f32> {
    let cross = (v2 - v1).cross(v3 - v1);
    if cross.magnitude2() > 0.0 {
        cross.normalize()
    } else {
        Vec3::zero()
    }
}

fn push_vec3(buffer: &mut Vec<f32>, v: Vec3<f32>) {
    buffer.extend_from_slice(&[v.x, v.y, v.z]);
}

fn read_vec3(buffer: &[f32], index: usize) -> Vec3<f32> {
    let i = index * VERTEX_COMPONENTS;
    Vec3::new(buffer[i], buffer[i + 1], buffer[i + 2])
}

fn unsupported_layout(data: &ObjData) -> ModelError {
    ModelError::UnsupportedLayout {
        vertices: data.vertices.len(),
        faces: data.faces.len(),
        normals: data.normals.len(),
        normal_indices: data.normal_indices.len(),
    }
}

#[derive(Debug, Clone)]
pub struct Model {
    drawing_method: DrawingMethod,
    vertex_data: Vec<f32>,
    normal_data: Vec<f32>,
    face_data: Vec<u32>,
    num_faces: usize,
}

impl Model {
    pub fn load(path: &Path, drawing_method: DrawingMethod) -> Result<Self, ModelError> {
        let file = File::open(path).map_err(|source| ModelError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let data = parse_obj(BufReader::new(file))?;

        if data.is_clean() {
            info!("Model {} loaded cleanly", path.display());
        } else {
            warn!(
                "Model {} load attempt produced {} problem(s)",
                path.display(),
                data.issues.len()
            );
        }
        info!("Vertex count: {}", data.vertices.len());
        if data.has_faces() {
            info!("Face count: {}", data.faces.len());
        }
        if data.has_normals() {
            info!("Normal count: {}", data.normals.len());
        }
        if data.has_normal_indices() {
            info!("Normal index count: {}", data.normal_indices.len());
        }

        Self::from_obj(&data, drawing_method)
    }

    /// Builds the data buffers for `drawing_method` from parsed `.obj` data.
    pub fn from_obj(data: &ObjData, drawing_method: DrawingMethod) -> Result<Self, ModelError> {
        if !data.has_vertices() {
            return Err(ModelError::NoVertices);
        }

        let source = if data.has_normals() && data.has_normal_indices() {
            if data.normal_indices.len() != data.faces.len() {
                return Err(ModelError::NormalIndexMismatch {
                    faces: data.faces.len(),
                    normal_indices: data.normal_indices.len(),
                });
            }
            NormalSource::Provided
        } else if data.has_normals() && data.has_faces() {
            // expanded arrays need a normal per corner and nothing says which
            if drawing_method == DrawingMethod::Arrays {
                return Err(unsupported_layout(data));
            }
            warn!("Model has normals but no face refers to them - normals will be generated");
            NormalSource::Generated
        } else {
            NormalSource::Generated
        };

        debug!("Setting up model data to draw as: {drawing_method}");
        let model = match drawing_method {
            DrawingMethod::Arrays => Self::setup_arrays(data, source)?,
            DrawingMethod::Elements => Self::setup_elements(data, source)?,
        };
        info!(
            "Number of vertices in data array: {} ({} bytes)",
            model.num_vertices(),
            model.vertex_data_size_bytes()
        );
        info!(
            "Number of normals  in data array: {} ({} bytes)",
            model.num_normals(),
            model.normal_data_size_bytes()
        );
        Ok(model)
    }

    fn face_positions(data: &ObjData, face_no: usize) -> Result<[Vec3<f32>; 3], ModelError> {
        let face = data.faces[face_no];
        Ok([
            fetch(&data.vertices, face[0], face_no, "vertex")?,
            fetch(&data.vertices, face[1], face_no, "vertex")?,
            fetch(&data.vertices, face[2], face_no, "vertex")?,
        ])
    }

    fn face_normals(
        data: &ObjData,
        source: &NormalSource,
        face_no: usize,
        positions: &[Vec3<f32>; 3],
    ) -> Result<[Vec3<f32>; 3], ModelError> {
        match source {
            NormalSource::Provided => {
                let numbers = data.normal_indices[face_no];
                Ok([
                    fetch(&data.normals, numbers[0], face_no, "normal")?,
                    fetch(&data.normals, numbers[1], face_no, "normal")?,
                    fetch(&data.normals, numbers[2], face_no, "normal")?,
                ])
            }
            NormalSource::Generated => {
                let n = face_normal(positions[0], positions[1], positions[2]);
                Ok([n; 3])
            }
        }
    }

    fn setup_arrays(data: &ObjData, source: NormalSource) -> Result<Self, ModelError> {
        if !data.has_faces() {
            if data.has_normals() {
                return Err(unsupported_layout(data));
            }
            info!("The model has no faces or normals. Transferring vertex data.");
            let mut vertex_data = Vec::with_capacity(data.vertices.len() * VERTEX_COMPONENTS);
            for v in &data.vertices {
                push_vec3(&mut vertex_data, *v);
            }
            return Ok(Model {
                drawing_method: DrawingMethod::Arrays,
                vertex_data,
                normal_data: Vec::new(),
                face_data: Vec::new(),
                num_faces: 0,
            });
        }

        if let NormalSource::Generated = source {
            info!("Model has vertices and faces, but no normals. Normals will be generated.");
        }

        let float_count = data.faces.len() * 3 * VERTEX_COMPONENTS;
        let mut vertex_data = Vec::with_capacity(float_count);
        let mut normal_data = Vec::with_capacity(float_count);
        for face_no in 0..data.faces.len() {
            let positions = Self::face_positions(data, face_no)?;
            let normals = Self::face_normals(data, &source, face_no, &positions)?;
            for corner in 0..3 {
                push_vec3(&mut vertex_data, positions[corner]);
                push_vec3(&mut normal_data, normals[corner]);
            }
        }

        Ok(Model {
            drawing_method: DrawingMethod::Arrays,
            vertex_data,
            normal_data,
            face_data: Vec::new(),
            num_faces: data.faces.len(),
        })
    }

    /// The vertex list is kept as the file gives it and faces index into it
    /// directly, so `face_data[k] == faces[k] - 1`. Each vertex carries one
    /// normal: the provided normal its corners name (the last one wins when
    /// corners disagree), or the normalized sum of the generated normals of
    /// the faces around it.
    fn setup_elements(data: &ObjData, source: NormalSource) -> Result<Self, ModelError> {
        if !data.has_faces() {
            return Err(ModelError::NoFaces);
        }

        let mut face_data = Vec::with_capacity(data.faces.len() * 3);
        let mut normals = vec![Vec3::zero(); data.vertices.len()];

        for (face_no, face) in data.faces.iter().enumerate() {
            let positions = Self::face_positions(data, face_no)?;
            let corner_normals = Self::face_normals(data, &source, face_no, &positions)?;
            for corner in 0..3 {
                // validated by face_positions, so at least 1
                let index = face[corner] - 1;
                let normal = &mut normals[index as usize];
                match source {
                    NormalSource::Provided => *normal = corner_normals[corner],
                    NormalSource::Generated => *normal += corner_normals[corner],
                }
                face_data.push(index);
            }
        }

        let mut vertex_data = Vec::with_capacity(data.vertices.len() * VERTEX_COMPONENTS);
        let mut normal_data = Vec::with_capacity(data.vertices.len() * VERTEX_COMPONENTS);
        for (position, normal) in data.vertices.iter().zip(normals) {
            push_vec3(&mut vertex_data, *position);
            let normal = if normal.magnitude2() > 0.0 {
                normal.normalize()
            } else {
                normal
            };
            push_vec3(&mut normal_data, normal);
        }

        Ok(Model {
            drawing_method: DrawingMethod::Elements,
            vertex_data,
            normal_data,
            face_data,
            num_faces: data.faces.len(),
        })
    }

    pub fn drawing_method(&self) -> DrawingMethod {
        self.drawing_method
    }

    pub fn vertex_data(&self) -> &[f32] {
        &self.vertex_data
    }

    pub fn normal_data(&self) -> &[f32] {
        &self.normal_data
    }

    /// 0-based element indices into the vertex data; empty when drawing as arrays.
    pub fn face_data(&self) -> &[u32] {
        &self.face_data
    }

    pub fn num_vertices(&self) -> usize {
        self.vertex_data.len() / VERTEX_COMPONENTS
    }

    pub fn num_normals(&self) -> usize {
        self.normal_data.len() / VERTEX_COMPONENTS
    }

    pub fn num_faces(&self) -> usize {
        self.num_faces
    }

    pub fn face_element_count(&self) -> usize {
        self.num_faces * 3
    }

    pub fn has_faces(&self) -> bool {
        self.num_faces > 0
    }

    pub fn has_normals(&self) -> bool {
        !self.normal_data.is_empty()
    }

    pub fn vertex_data_size_bytes(&self) -> usize {
        self.vertex_data.len() * size_of::<f32>()
    }

    pub fn normal_data_size_bytes(&self) -> usize {
        self.normal_data.len() * size_of::<f32>()
    }

    pub fn face_data_size_bytes(&self) -> usize {
        self.face_data.len() * size_of::<u32>()
    }

    pub fn scale(&mut self, scale: f32) {
        self.scale_xyz(scale, scale, scale);
    }

    pub fn scale_xyz(&mut self, x_scale: f32, y_scale: f32, z_scale: f32) {
        for position in self.vertex_data.chunks_exact_mut(VERTEX_COMPONENTS) {
            position[0] *= x_scale;
            position[1] *= y_scale;
            position[2] *= z_scale;
        }
    }

    /// The positions as points, for models without faces.
    pub fn points(&self) -> Vec<Vec3<f32>> {
        (0..self.num_vertices())
            .map(|i| read_vec3(&self.vertex_data, i))
            .collect()
    }

    /// Pipeline triangles. Both drawing methods yield the same positions in
    /// the same order; arrays carry flat face normals, elements the shared
    /// per-vertex normals.
    pub fn triangles(&self) -> Vec<Triangle> {
        if !self.has_faces() {
            return Vec::new();
        }
        let vertex = |i: usize| Vertex::new(read_vec3(&self.vertex_data, i), read_vec3(&self.normal_data, i));
        match self.drawing_method {
            DrawingMethod::Arrays => (0..self.num_faces)
                .map(|f| Triangle::new(vertex(f * 3), vertex(f * 3 + 1), vertex(f * 3 + 2)))
                .collect(),
            DrawingMethod::Elements => self
                .face_data
                .chunks_exact(3)
                .map(|face| {
                    Triangle::new(
                        vertex(face[0] as usize),
                        vertex(face[1] as usize),
                        vertex(face[2] as usize),
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ObjData {
        parse_obj(text.as_bytes()).expect("in-memory read cannot fail")
    }

    #[test]
    fn comments_groups_and_blank_lines_are_ignored() {
        let data = parse("# a comment\n\no thing\ng group\ns off\nusemtl none\nv 1 2 3\n");
        assert!(data.is_clean());
        assert_eq!(data.vertices, vec![Vec3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn wrong_component_counts_are_skipped_and_reported() {
        let data = parse("v 1 2\nv 1 2 3\nvn 0 1\nf 1 2\nf 1 2 3 4\n");
        assert_eq!(data.vertices.len(), 1);
        assert!(data.normals.is_empty());
        assert!(data.faces.is_empty());
        let kinds: Vec<IssueKind> = data.issues.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::VertexComponentCount,
                IssueKind::NormalComponentCount,
                IssueKind::FaceComponentCount,
                IssueKind::FaceComponentCount,
            ]
        );
        assert_eq!(data.issues[0].line, 1);
        assert_eq!(data.issues[3].line, 5);
    }

    #[test]
    fn face_corner_forms() {
        assert_eq!(parse_corner("7"), Ok((7, None)));
        assert_eq!(parse_corner("7/3"), Ok((7, None)));
        assert_eq!(parse_corner("7//2"), Ok((7, Some(2))));
        assert_eq!(parse_corner("7/3/2"), Ok((7, Some(2))));
        assert_eq!(parse_corner("x"), Err(IssueKind::BadNumber));
        assert_eq!(parse_corner("-1"), Err(IssueKind::BadNumber));
    }

    #[test]
    fn mixed_face_is_rejected() {
        let data = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2 3\n");
        assert!(data.faces.is_empty());
        assert_eq!(data.issues[0].kind, IssueKind::MixedFaceFormat);
    }

    #[test]
    fn drawing_method_parses_case_insensitively() {
        assert_eq!("Elements".parse::<DrawingMethod>().ok(), Some(DrawingMethod::Elements));
        assert_eq!("arrays".parse::<DrawingMethod>().ok(), Some(DrawingMethod::Arrays));
        assert!("strips".parse::<DrawingMethod>().is_err());
    }

    #[test]
    fn out_of_range_face_is_an_error_not_a_panic() {
        let data = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n");
        let err = Model::from_obj(&data, DrawingMethod::Arrays).unwrap_err();
        assert!(matches!(err, ModelError::IndexOutOfRange { index: 4, count: 3, .. }));

        let data = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n");
        let err = Model::from_obj(&data, DrawingMethod::Elements).unwrap_err();
        assert!(matches!(err, ModelError::IndexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn scale_multiplies_every_axis() {
        let data = parse("v 1 2 3\nv -1 0 4\n");
        let mut model = Model::from_obj(&data, DrawingMethod::Arrays).unwrap();
        model.scale_xyz(2.0, 3.0, 0.5);
        assert_eq!(model.vertex_data(), &[2.0, 6.0, 1.5, -2.0, 0.0, 2.0]);
        model.scale(2.0);
        assert_eq!(model.vertex_data(), &[4.0, 12.0, 3.0, -4.0, 0.0, 4.0]);
    }

    #[test]
    fn elements_index_the_file_vertices_directly() {
        let data = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 3 2 1\nf 2 3 4\n");
        let model = Model::from_obj(&data, DrawingMethod::Elements).unwrap();
        assert_eq!(model.face_data(), &[2, 1, 0, 1, 2, 3]);
        assert_eq!(model.num_vertices(), 4);
        assert_eq!(model.vertex_data()[9..12], [1.0, 1.0, 0.0]);
    }

    #[test]
    fn elements_average_generated_normals_per_vertex() {
        // two faces meeting at a right angle along the edge 1-2
        let data = parse("v 0 0 0\nv 1 0 0\nv 0 0 -1\nv 0 1 0\nf 1 2 3\nf 1 2 4\n");
        let model = Model::from_obj(&data, DrawingMethod::Elements).unwrap();
        let shared = read_vec3(model.normal_data(), 0);
        let expected = Vec3::new(0.0, 1.0, 1.0).normalize();
        assert!((shared - expected).magnitude() < 1e-6);
        assert_eq!(read_vec3(model.normal_data(), 2), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(read_vec3(model.normal_data(), 3), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn unreferenced_normals_cannot_be_drawn_as_arrays() {
        let data = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1 2 3\n");
        assert!(matches!(
            Model::from_obj(&data, DrawingMethod::Arrays),
            Err(ModelError::UnsupportedLayout { faces: 1, normals: 1, normal_indices: 0, .. })
        ));
        let model = Model::from_obj(&data, DrawingMethod::Elements).unwrap();
        assert_eq!(read_vec3(model.normal_data(), 0), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn normals_without_faces_cannot_be_drawn_as_arrays() {
        let data = parse("v 0 0 0\nvn 0 1 0\n");
        assert!(matches!(
            Model::from_obj(&data, DrawingMethod::Arrays),
            Err(ModelError::UnsupportedLayout { vertices: 1, normals: 1, .. })
        ));
    }
}
