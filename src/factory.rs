//! Factory Method pattern walkthrough.
//!
//! A creator trait defers the choice of concrete product to its
//! implementors: `Logistics::plan_delivery` is written once against the
//! `Transport` trait, and each concrete logistics company decides which
//! transport it creates. This entry is illustrative only — no validation,
//! caching, or failure handling.
//!
//! Run the demo with: `cargo run --example factory_method`

/// The product interface: something that can carry cargo.
pub trait Transport {
    fn deliver(&self) -> String;
}

pub struct Truck;

impl Transport for Truck {
    fn deliver(&self) -> String {
        "Delivering by land in a truck".to_string()
    }
}

pub struct Ship;

impl Transport for Ship {
    fn deliver(&self) -> String {
        "Delivering by sea in a ship".to_string()
    }
}

/// The creator interface.
///
/// `create_transport` is the factory method; `plan_delivery` is the shared
/// business logic that only ever talks to the `Transport` interface.
pub trait Logistics {
    fn create_transport(&self) -> Box<dyn Transport>;

    fn plan_delivery(&self) -> String {
        let transport = self.create_transport();
        format!("Planned: {}", transport.deliver())
    }
}

pub struct RoadLogistics;

impl Logistics for RoadLogistics {
    fn create_transport(&self) -> Box<dyn Transport> {
        Box::new(Truck)
    }
}

pub struct SeaLogistics;

impl Logistics for SeaLogistics {
    fn create_transport(&self) -> Box<dyn Transport> {
        Box::new(Ship)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_road_logistics_creates_truck() {
        let logistics = RoadLogistics;
        assert_eq!(
            logistics.plan_delivery(),
            "Planned: Delivering by land in a truck"
        );
    }

    #[test]
    fn test_sea_logistics_creates_ship() {
        let logistics = SeaLogistics;
        assert_eq!(
            logistics.plan_delivery(),
            "Planned: Delivering by sea in a ship"
        );
    }

    #[test]
    fn test_creators_behind_one_interface() {
        let companies: Vec<Box<dyn Logistics>> = vec![Box::new(RoadLogistics), Box::new(SeaLogistics)];
        let plans: Vec<String> = companies.iter().map(|c| c.plan_delivery()).collect();
        assert_eq!(plans.len(), 2);
        assert_ne!(plans[0], plans[1]);
    }
}
