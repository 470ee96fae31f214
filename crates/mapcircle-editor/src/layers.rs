//! Source and layer naming and styling for one circle.

use mapcircle_core::constants::{HANDLE_IDLE_COLOR, HANDLE_RADIUS_PX, HANDLE_STROKE_WIDTH_PX};
use mapcircle_core::InstanceId;
use serde_json::{json, Map, Value};

use crate::host::{LayerSpec, LayerType};
use crate::options::CircleOptions;

/// Source and layer ids, suffixed with the instance id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerIds {
    pub circle_source: String,
    pub center_handle_source: String,
    pub radius_handles_source: String,
    pub stroke_layer: String,
    pub fill_layer: String,
    pub center_handle_layer: String,
    pub radius_handles_layer: String,
}

impl LayerIds {
    pub fn for_instance(id: InstanceId) -> Self {
        Self {
            circle_source: format!("circle-source-{id}"),
            center_handle_source: format!("circle-center-handle-source-{id}"),
            radius_handles_source: format!("circle-radius-handles-source-{id}"),
            stroke_layer: format!("circle-stroke-layer-{id}"),
            fill_layer: format!("circle-fill-layer-{id}"),
            center_handle_layer: format!("circle-center-handle-layer-{id}"),
            radius_handles_layer: format!("circle-radius-handles-layer-{id}"),
        }
    }

    /// Layers in insertion order, bottom to top.
    pub fn layers(&self, editable: bool) -> Vec<&str> {
        let mut layers = vec![self.fill_layer.as_str(), self.stroke_layer.as_str()];
        if editable {
            layers.push(self.radius_handles_layer.as_str());
            layers.push(self.center_handle_layer.as_str());
        }
        layers
    }

    pub fn sources(&self, editable: bool) -> Vec<&str> {
        let mut sources = vec![self.circle_source.as_str()];
        if editable {
            sources.push(self.center_handle_source.as_str());
            sources.push(self.radius_handles_source.as_str());
        }
        sources
    }

    /// Whether a rendered layer id belongs to one of this circle's handles.
    pub fn is_handle_layer(&self, layer: &str) -> bool {
        layer == self.center_handle_layer || layer == self.radius_handles_layer
    }
}

fn paint(entries: Vec<(&str, Value)>) -> Map<String, Value> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

pub fn stroke_layer(ids: &LayerIds, options: &CircleOptions) -> LayerSpec {
    LayerSpec {
        id: ids.stroke_layer.clone(),
        layer_type: LayerType::Line,
        source: ids.circle_source.clone(),
        paint: paint(vec![
            ("line-color", json!(options.stroke_color)),
            ("line-width", json!(options.stroke_weight)),
            ("line-opacity", json!(options.stroke_opacity)),
        ]),
    }
}

pub fn fill_layer(ids: &LayerIds, options: &CircleOptions) -> LayerSpec {
    LayerSpec {
        id: ids.fill_layer.clone(),
        layer_type: LayerType::Fill,
        source: ids.circle_source.clone(),
        paint: paint(vec![
            ("fill-color", json!(options.fill_color)),
            ("fill-opacity", json!(options.fill_opacity)),
        ]),
    }
}

fn handle_layer(id: &str, source: &str, options: &CircleOptions) -> LayerSpec {
    LayerSpec {
        id: id.to_string(),
        layer_type: LayerType::Circle,
        source: source.to_string(),
        paint: paint(vec![
            ("circle-color", json!(HANDLE_IDLE_COLOR)),
            ("circle-radius", json!(HANDLE_RADIUS_PX)),
            ("circle-stroke-color", json!(options.stroke_color)),
            ("circle-stroke-opacity", json!(options.stroke_opacity)),
            ("circle-stroke-width", json!(HANDLE_STROKE_WIDTH_PX)),
        ]),
    }
}

pub fn center_handle_layer(ids: &LayerIds, options: &CircleOptions) -> LayerSpec {
    handle_layer(&ids.center_handle_layer, &ids.center_handle_source, options)
}

pub fn radius_handles_layer(ids: &LayerIds, options: &CircleOptions) -> LayerSpec {
    handle_layer(&ids.radius_handles_layer, &ids.radius_handles_source, options)
}

/// Handle fill color: the stroke color while highlighted.
pub fn handle_color(options: &CircleOptions, highlighted: bool) -> Value {
    if highlighted {
        json!(options.stroke_color)
    } else {
        json!(HANDLE_IDLE_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_suffixed() {
        let id = InstanceId::next();
        let ids = LayerIds::for_instance(id);
        assert_eq!(ids.fill_layer, format!("circle-fill-layer-{id}"));
        assert!(ids.is_handle_layer(&ids.center_handle_layer));
        assert!(!ids.is_handle_layer(&ids.fill_layer));
    }

    #[test]
    fn test_layer_sets() {
        let ids = LayerIds::for_instance(InstanceId::next());
        assert_eq!(ids.layers(false).len(), 2);
        assert_eq!(ids.layers(true).len(), 4);
        assert_eq!(ids.sources(false), vec![ids.circle_source.as_str()]);
        assert_eq!(ids.sources(true).len(), 3);
    }

    #[test]
    fn test_paint_follows_options() {
        let ids = LayerIds::for_instance(InstanceId::next());
        let options = CircleOptions::default();
        let fill = fill_layer(&ids, &options);
        assert_eq!(fill.paint["fill-color"], json!("#FB6A4A"));
        let stroke = stroke_layer(&ids, &options);
        assert_eq!(stroke.paint["line-width"], json!(0.5));
        assert_eq!(handle_color(&options, true), json!("#000000"));
        assert_eq!(handle_color(&options, false), json!("#ffffff"));
    }
}
