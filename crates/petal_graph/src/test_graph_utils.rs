#[cfg(test)]
pub mod test_graph {
    use crate::{
        builder::{NewEdge, RoadNetworkBuilder},
        geopoint::GeoPoint,
        meters,
        road_network::RoadNetwork,
        types::NodeId,
    };

    //
    //            North
    //          /       \
    //    200 m          200 m
    //       /             \
    //   West               East          Island ---- Islet
    //       \             /
    //    100 m          150 m (oneway South -> East)
    //          \       /
    //            South
    //
    #[derive(Clone, Copy, Debug)]
    pub enum DiamondNode {
        West = 0,
        North = 1,
        South = 2,
        East = 3,
        Island = 4,
        Islet = 5,
    }

    impl From<DiamondNode> for NodeId {
        fn from(value: DiamondNode) -> Self {
            value as NodeId
        }
    }

    pub fn create_diamond_network() -> RoadNetwork {
        let mut builder = RoadNetworkBuilder::new();

        let nodes = [
            (DiamondNode::West, GeoPoint::new(50.0, 5.0), Some(10.0)),
            (DiamondNode::North, GeoPoint::new(50.001, 5.0015), Some(30.0)),
            (DiamondNode::South, GeoPoint::new(49.999, 5.0015), Some(5.0)),
            (DiamondNode::East, GeoPoint::new(50.0, 5.003), Some(12.0)),
            (DiamondNode::Island, GeoPoint::new(50.01, 5.01), None),
            (DiamondNode::Islet, GeoPoint::new(50.011, 5.01), None),
        ];

        for (node, position, elevation) in nodes {
            let node_id = builder.add_node(node as i64 + 100, position, elevation);
            assert_eq!(node_id, NodeId::from(node));
        }

        let edges = [
            NewEdge::between(DiamondNode::West.into(), DiamondNode::North.into())
                .with_length(meters!(200))
                .with_surface("asphalt"),
            NewEdge::between(DiamondNode::North.into(), DiamondNode::East.into())
                .with_length(meters!(200))
                .with_surface("gravel"),
            NewEdge::between(DiamondNode::West.into(), DiamondNode::South.into())
                .with_length(meters!(100)),
            NewEdge::between(DiamondNode::South.into(), DiamondNode::East.into())
                .with_length(meters!(150))
                .with_surface("paving_stones")
                .oneway(),
            NewEdge::between(DiamondNode::Island.into(), DiamondNode::Islet.into())
                .with_length(meters!(120)),
        ];

        for edge in edges {
            builder.add_edge(edge).expect("diamond nodes exist");
        }

        builder.build()
    }
}
