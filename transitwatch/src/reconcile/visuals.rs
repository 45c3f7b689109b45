//! Geometry and label policy for rendered entities.
//!
//! A vehicle with a known heading gets a directional arrow rotated to the
//! rounded bearing; a bearing of zero means "unknown or stationary" and gets
//! a plain dot. The label carries the route id, with the rounded speed
//! appended only when the vehicle is moving.

use crate::geo::LatLon;
use crate::model::{StopSnapshot, VehicleSnapshot};
use crate::surface::{MarkerStyle, Visual};

/// Tooltip placeholder when the feed carries no last-stop name.
pub const UNKNOWN_STOP: &str = "unknown";

/// Build the marker/label pair for a vehicle.
pub(crate) fn vehicle_visuals(vehicle: &VehicleSnapshot) -> (Visual, Visual) {
    let position = LatLon::new(vehicle.lat, vehicle.lon);
    let style = if vehicle.bearing > 0.0 {
        MarkerStyle::Directional {
            bearing_deg: vehicle.bearing.round() as i32,
        }
    } else {
        MarkerStyle::Dot
    };
    let marker = Visual::Marker { position, style };
    let label = Visual::Label {
        position,
        text: vehicle_label_text(vehicle),
        tooltip: Some(
            vehicle
                .last_stop_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_STOP.to_string()),
        ),
    };
    (marker, label)
}

/// Build the marker/label pair for a stop.
pub(crate) fn stop_visuals(stop: &StopSnapshot) -> (Visual, Visual) {
    let position = LatLon::new(stop.lat, stop.lon);
    let marker = Visual::Marker {
        position,
        style: MarkerStyle::Stop,
    };
    let label = Visual::Label {
        position,
        text: stop.stop_name.clone(),
        tooltip: None,
    };
    (marker, label)
}

/// Label text: `route_id` alone when stationary, `route_id@<kmh> Km/h`
/// otherwise. Speed is rounded to whole km/h.
pub(crate) fn vehicle_label_text(vehicle: &VehicleSnapshot) -> String {
    let kmh = vehicle.speed_kmh.round() as i64;
    if kmh == 0 {
        vehicle.route_id.clone()
    } else {
        format!("{}@{} Km/h", vehicle.route_id, kmh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(bearing: f64, speed_kmh: f64) -> VehicleSnapshot {
        VehicleSnapshot {
            vehicle_id: "v-1".to_string(),
            route_id: "64".to_string(),
            lat: 41.9,
            lon: 12.5,
            bearing,
            speed_kmh,
            last_stop_name: None,
        }
    }

    #[test]
    fn test_moving_vehicle_gets_directional_marker() {
        let (marker, _) = vehicle_visuals(&vehicle(89.6, 30.0));
        assert_eq!(
            marker,
            Visual::Marker {
                position: LatLon::new(41.9, 12.5),
                style: MarkerStyle::Directional { bearing_deg: 90 },
            }
        );
    }

    #[test]
    fn test_zero_bearing_gets_dot() {
        let (marker, _) = vehicle_visuals(&vehicle(0.0, 30.0));
        assert!(matches!(
            marker,
            Visual::Marker {
                style: MarkerStyle::Dot,
                ..
            }
        ));
    }

    #[test]
    fn test_label_omits_speed_when_stationary() {
        assert_eq!(vehicle_label_text(&vehicle(0.0, 0.0)), "64");
        // Rounds to zero.
        assert_eq!(vehicle_label_text(&vehicle(0.0, 0.4)), "64");
    }

    #[test]
    fn test_label_includes_rounded_speed() {
        assert_eq!(vehicle_label_text(&vehicle(0.0, 32.4)), "64@32 Km/h");
        assert_eq!(vehicle_label_text(&vehicle(0.0, 32.5)), "64@33 Km/h");
    }

    #[test]
    fn test_tooltip_falls_back_to_unknown() {
        let (_, label) = vehicle_visuals(&vehicle(0.0, 0.0));
        match label {
            Visual::Label { tooltip, .. } => {
                assert_eq!(tooltip.as_deref(), Some(UNKNOWN_STOP));
            }
            other => panic!("expected label, got {:?}", other),
        }
    }

    #[test]
    fn test_stop_visuals() {
        let stop = StopSnapshot {
            stop_id: "s-1".to_string(),
            lat: 41.0,
            lon: 12.0,
            stop_name: "Termini".to_string(),
        };
        let (marker, label) = stop_visuals(&stop);
        assert!(matches!(
            marker,
            Visual::Marker {
                style: MarkerStyle::Stop,
                ..
            }
        ));
        match label {
            Visual::Label { text, tooltip, .. } => {
                assert_eq!(text, "Termini");
                assert!(tooltip.is_none());
            }
            other => panic!("expected label, got {:?}", other),
        }
    }
}
