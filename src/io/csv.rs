use crate::cell::GeohashCell;
use crate::error::GeohashError;
use crate::geom::parse_geometry;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

enum SourceIndices {
    Geometry(usize),
    Coordinates { lon_idx: usize, lat_idx: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry in WGS84
    GeometryColumn(String),
    /// Separate longitude and latitude columns
    CoordinateColumns {
        lon_column: String,
        lat_column: String,
    },
}

#[derive(Debug, Clone)]
pub struct CsvGeohashConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub precision: usize,
    pub include_cell_geometry: Option<GeometryFormat>,
    pub include_neighbors: bool,
}

impl CsvGeohashConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use geohash_rs::CsvGeohashConfig;
    ///
    /// let config = CsvGeohashConfig::new("geometry", 7);
    /// ```
    pub fn new(geometry_column: impl Into<String>, precision: usize) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            precision,
            include_cell_geometry: None,
            include_neighbors: false,
        }
    }

    /// Create config for a CSV with separate longitude/latitude columns.
    ///
    /// # Example
    /// ```
    /// use geohash_rs::CsvGeohashConfig;
    ///
    /// let config = CsvGeohashConfig::from_coords("Longitude", "Latitude", 7);
    /// ```
    pub fn from_coords(
        lon_column: impl Into<String>,
        lat_column: impl Into<String>,
        precision: usize,
    ) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lon_column: lon_column.into(),
                lat_column: lat_column.into(),
            },
            exclude_columns: Vec::new(),
            precision,
            include_cell_geometry: None,
            include_neighbors: false,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    /// Include the cell rectangle in the output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }

    /// Include the `;`-joined neighbour hashes in the output.
    pub fn with_neighbors(mut self, include: bool) -> Self {
        self.include_neighbors = include;
        self
    }
}

pub trait CsvToGeohash {
    fn to_geohash_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvGeohashConfig,
    ) -> Result<(), GeohashError>;
}

impl<P: AsRef<Path>> CsvToGeohash for P {
    fn to_geohash_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvGeohashConfig,
    ) -> Result<(), GeohashError> {
        csv_to_geohash_csv(self, output_path, config)
    }
}

fn csv_err(e: impl std::fmt::Display) -> GeohashError {
    GeohashError::CsvError(e.to_string())
}

fn find_column(headers: &csv::StringRecord, name: &str, label: &str) -> Result<usize, GeohashError> {
    if name.is_empty() {
        return Err(GeohashError::CsvError(format!(
            "{} column name cannot be empty",
            label
        )));
    }
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| GeohashError::CsvError(format!("{} column '{}' not found", label, name)))
}

fn parse_field(record: &csv::StringRecord, idx: usize, label: &str) -> Result<f64, GeohashError> {
    let raw = record
        .get(idx)
        .ok_or_else(|| GeohashError::CsvError(format!("Missing {} column at index {}", label, idx)))?
        .trim();
    raw.parse()
        .map_err(|_| GeohashError::CsvError(format!("Invalid {}: '{}'", label, raw)))
}

fn cell_geometry(cell: &GeohashCell, format: GeometryFormat) -> String {
    let polygon = cell.to_polygon();
    match format {
        GeometryFormat::Wkt => {
            use wkt::ToWkt;
            polygon.wkt_string()
        }
        GeometryFormat::GeoJson => geojson::Geometry::from(&polygon).to_string(),
    }
}

/// Converts a CSV file with geometry or coordinate columns to a CSV file keyed by geohash.
///
/// The source columns are replaced by a leading `geohash` column; a geometry
/// that yields several cells (a line, a multipoint) yields one output row per
/// cell. Streams output to keep memory flat for large files.
///
/// # Example with geometry column (WKT or GeoJSON)
///
/// ```no_run
/// use geohash_rs::{csv_to_geohash_csv, CsvGeohashConfig, GeometryFormat};
///
/// let config = CsvGeohashConfig::new("Geo Shape", 7)
///     .exclude(vec!["Geo Point".into()])
///     .with_cell_geometry(GeometryFormat::Wkt);
///
/// csv_to_geohash_csv("input.csv", "output.csv", &config).unwrap();
/// ```
///
/// # Example with coordinate columns
///
/// ```no_run
/// use geohash_rs::{csv_to_geohash_csv, CsvGeohashConfig};
///
/// let config = CsvGeohashConfig::from_coords("Longitude", "Latitude", 7).with_neighbors(true);
///
/// csv_to_geohash_csv("bus_stops.csv", "output.csv", &config).unwrap();
/// ```
pub fn csv_to_geohash_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvGeohashConfig,
) -> Result<(), GeohashError> {
    let file = File::open(csv_path).map_err(|e| GeohashError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers().map_err(csv_err)?.clone();

    // Source columns never reach the output.
    let mut exclude_indices = HashSet::new();
    let source_indices = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = find_column(&headers, col, "Geometry")?;
            exclude_indices.insert(idx);
            SourceIndices::Geometry(idx)
        }
        CoordinateSource::CoordinateColumns {
            lon_column,
            lat_column,
        } => {
            let lon_idx = find_column(&headers, lon_column, "Longitude")?;
            let lat_idx = find_column(&headers, lat_column, "Latitude")?;
            exclude_indices.insert(lon_idx);
            exclude_indices.insert(lat_idx);
            SourceIndices::Coordinates { lon_idx, lat_idx }
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| GeohashError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["geohash"];
    if config.include_cell_geometry.is_some() {
        header_row.push("cell_geometry");
    }
    if config.include_neighbors {
        header_row.push("neighbors");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer.write_record(&header_row).map_err(csv_err)?;

    let mut rows_in = 0usize;
    let mut rows_out = 0usize;
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        rows_in += 1;

        let cells = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom_str = record.get(*idx).ok_or_else(|| {
                    GeohashError::CsvError(format!("Missing geometry column at index {}", idx))
                })?;
                GeohashCell::from_geometry(parse_geometry(geom_str)?, config.precision)?
            }
            SourceIndices::Coordinates { lon_idx, lat_idx } => {
                let lon = parse_field(&record, *lon_idx, "longitude")?;
                let lat = parse_field(&record, *lat_idx, "latitude")?;
                vec![GeohashCell::from_wgs84(&(lon, lat), config.precision)?]
            }
        };
        if cells.is_empty() {
            log::warn!("CSV row {} produced no geohash cells", rows_in);
        }

        for cell in cells {
            let mut row: Vec<String> = vec![cell.hash.clone()];

            if let Some(format) = config.include_cell_geometry {
                row.push(cell_geometry(&cell, format));
            }
            if config.include_neighbors {
                row.push(crate::index::neighbors(&cell.hash)?.join(";"));
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer.write_record(&row).map_err(csv_err)?;
            rows_out += 1;
        }
    }

    writer.flush().map_err(csv_err)?;
    log::debug!(
        "tagged {} CSV rows into {} geohash rows at precision {}",
        rows_in,
        rows_out,
        config.precision
    );

    Ok(())
}
