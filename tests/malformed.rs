use polyfold::{
    mesh_to_poly_data, poly_data_to_mesh, AttributeData, ComponentBuffer, ComponentType, Error,
    Mesh, MeshType, PolyData,
};

fn mesh_with_cells(cells: ComponentBuffer, declared_size: usize, declared_cells: usize) -> Mesh {
    Mesh {
        mesh_type: MeshType::canonical(),
        number_of_points: 3,
        points: ComponentBuffer::Float32(vec![0.0; 9]),
        number_of_cells: declared_cells,
        cell_buffer_size: declared_size,
        cells,
        point_data: None,
        cell_data: None,
    }
}

fn poly_with_polygons(polygons: Vec<u32>, declared_size: usize, declared_polygons: usize) -> PolyData {
    PolyData {
        number_of_points: 3,
        points: vec![0.0; 9],
        vertices: None,
        lines: None,
        number_of_polygons: declared_polygons,
        polygons_buffer_size: declared_size,
        polygons,
        triangle_strips: None,
        point_data: None,
        cell_data: None,
    }
}

#[test]
fn declared_cell_buffer_size_must_match_storage() {
    // one well-formed triangle record, but a size field that lies
    let mesh = mesh_with_cells(ComponentBuffer::UInt32(vec![2, 3, 0, 1, 2]), 4, 1);
    let err = mesh_to_poly_data(&mesh).unwrap_err();
    assert_eq!(
        err,
        Error::CellBufferSize {
            declared: 4,
            actual: 5
        }
    );
    assert!(err.is_malformed_input());
}

#[test]
fn record_running_past_the_buffer_is_truncation_not_output() {
    // triangle record declaring 3 indices with only 2 stored
    let mesh = mesh_with_cells(ComponentBuffer::UInt32(vec![2, 3, 0, 1]), 4, 1);
    assert_eq!(
        mesh_to_poly_data(&mesh).unwrap_err(),
        Error::TruncatedCellRecord { offset: 0 }
    );
}

#[test]
fn cell_count_mismatch_is_detected_after_the_walk() {
    let mesh = mesh_with_cells(ComponentBuffer::UInt32(vec![2, 3, 0, 1, 2]), 5, 2);
    assert_eq!(
        mesh_to_poly_data(&mesh).unwrap_err(),
        Error::CellCountMismatch {
            declared: 2,
            walked: 1
        }
    );
}

#[test]
fn unknown_cell_tag_fails() {
    let mesh = mesh_with_cells(ComponentBuffer::UInt32(vec![9, 3, 0, 1, 2]), 5, 1);
    assert_eq!(
        mesh_to_poly_data(&mesh).unwrap_err(),
        Error::UnknownCellType(9)
    );
}

#[test]
fn fixed_arity_topologies_must_declare_their_arity() {
    // a "triangle" claiming four vertices
    let mesh = mesh_with_cells(ComponentBuffer::UInt32(vec![2, 4, 0, 1, 2, 0]), 6, 1);
    assert_eq!(
        mesh_to_poly_data(&mesh).unwrap_err(),
        Error::RecordArity {
            offset: 0,
            expected: 3,
            actual: 4
        }
    );
}

#[test]
fn float_typed_cell_storage_cannot_carry_indices() {
    let mesh = mesh_with_cells(ComponentBuffer::Float32(vec![2.0, 3.0, 0.0, 1.0, 2.0]), 5, 1);
    assert_eq!(
        mesh_to_poly_data(&mesh).unwrap_err(),
        Error::NonIntegralIndex(ComponentType::Float32)
    );
}

#[test]
fn negative_index_values_are_malformed() {
    let mesh = mesh_with_cells(ComponentBuffer::Int32(vec![2, 3, 0, -1, 2]), 5, 1);
    assert_eq!(
        mesh_to_poly_data(&mesh).unwrap_err(),
        Error::NegativeValue {
            offset: 3,
            value: -1
        }
    );
}

#[test]
fn vertex_indices_are_bounds_checked() {
    let mesh = mesh_with_cells(ComponentBuffer::UInt32(vec![2, 3, 0, 1, 7]), 5, 1);
    assert_eq!(
        mesh_to_poly_data(&mesh).unwrap_err(),
        Error::VertexOutOfRange { index: 7, points: 3 }
    );
}

#[test]
fn point_buffer_cardinality_is_checked() {
    let mut mesh = mesh_with_cells(ComponentBuffer::UInt32(vec![2, 3, 0, 1, 2]), 5, 1);
    mesh.points = ComponentBuffer::Float32(vec![0.0; 7]);
    assert_eq!(
        mesh_to_poly_data(&mesh).unwrap_err(),
        Error::PointBufferSize {
            points: 3,
            dimension: 3,
            actual: 7
        }
    );
}

#[test]
fn zero_dimension_is_rejected() {
    let mut mesh = mesh_with_cells(ComponentBuffer::UInt32(vec![2, 3, 0, 1, 2]), 5, 1);
    mesh.mesh_type.dimension = 0;
    assert_eq!(mesh_to_poly_data(&mesh).unwrap_err(), Error::ZeroDimension);
    assert_eq!(mesh.validate().unwrap_err(), Error::ZeroDimension);
}

#[test]
fn attribute_shape_is_checked_before_conversion() {
    let shape = AttributeData::new(2, ComponentBuffer::Float32(vec![0.0; 5])).unwrap_err();
    assert_eq!(
        shape,
        Error::AttributeShape {
            components: 2,
            len: 5
        }
    );

    let mut mesh = mesh_with_cells(ComponentBuffer::UInt32(vec![2, 3, 0, 1, 2]), 5, 1);
    mesh.point_data = Some(AttributeData {
        components: 0,
        values: ComponentBuffer::Float32(vec![0.0; 3]),
    });
    assert_eq!(
        mesh_to_poly_data(&mesh).unwrap_err(),
        Error::AttributeShape {
            components: 0,
            len: 3
        }
    );
}

#[test]
fn declared_polygon_buffer_size_must_match_storage() {
    let poly = poly_with_polygons(vec![3, 0, 1, 2], 3, 1);
    let err = poly_data_to_mesh(&poly).unwrap_err();
    assert_eq!(
        err,
        Error::PolygonBufferSize {
            declared: 3,
            actual: 4
        }
    );
}

#[test]
fn truncated_polygon_record_fails() {
    let poly = poly_with_polygons(vec![3, 0, 1], 3, 1);
    assert_eq!(
        poly_data_to_mesh(&poly).unwrap_err(),
        Error::TruncatedPolygonRecord { offset: 0 }
    );
}

#[test]
fn polygon_count_mismatch_is_detected() {
    let poly = poly_with_polygons(vec![3, 0, 1, 2], 4, 2);
    assert_eq!(
        poly_data_to_mesh(&poly).unwrap_err(),
        Error::PolygonCountMismatch {
            declared: 2,
            walked: 1
        }
    );
}

#[test]
fn polygon_indices_are_bounds_checked() {
    let poly = poly_with_polygons(vec![3, 0, 1, 9], 4, 1);
    assert_eq!(
        poly_data_to_mesh(&poly).unwrap_err(),
        Error::VertexOutOfRange { index: 9, points: 3 }
    );
}

#[test]
fn vertex_records_must_list_exactly_one_point() {
    let mut poly = poly_with_polygons(vec![3, 0, 1, 2], 4, 1);
    poly.vertices = Some(vec![2, 0, 1]);
    assert_eq!(
        poly_data_to_mesh(&poly).unwrap_err(),
        Error::RecordArity {
            offset: 0,
            expected: 1,
            actual: 2
        }
    );
}

#[test]
fn line_records_must_list_exactly_two_points() {
    let mut poly = poly_with_polygons(vec![3, 0, 1, 2], 4, 1);
    poly.lines = Some(vec![1, 0]);
    assert_eq!(
        poly_data_to_mesh(&poly).unwrap_err(),
        Error::RecordArity {
            offset: 0,
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn short_triangle_strips_fail() {
    let mut poly = poly_with_polygons(vec![3, 0, 1, 2], 4, 1);
    poly.triangle_strips = Some(vec![2, 0, 1]);
    assert_eq!(
        poly_data_to_mesh(&poly).unwrap_err(),
        Error::StripTooShort { offset: 0, actual: 2 }
    );
}

#[test]
fn validate_walks_every_array() {
    let mut poly = poly_with_polygons(vec![3, 0, 1, 2], 4, 1);
    poly.validate().unwrap();
    poly.triangle_strips = Some(vec![4, 0, 1, 2]);
    assert_eq!(
        poly.validate().unwrap_err(),
        Error::TruncatedPolygonRecord { offset: 0 }
    );
}
