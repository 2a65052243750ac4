#[derive(Clone, Debug, PartialEq)]
pub struct ObjectPreset {
    pub name: &'static str,
    pub mass: f64,             // kg
    pub diameter: f64,         // m
    pub drag_coefficient: f64, // dimensionless
}

pub const OBJECT_PRESETS: [ObjectPreset; 3] = [
    ObjectPreset {
        name: "Basketball",
        mass: 0.62,
        diameter: 0.24,
        drag_coefficient: 0.47,
    },
    ObjectPreset {
        name: "Tennis ball",
        mass: 0.057,
        diameter: 0.067,
        drag_coefficient: 0.55,
    },
    ObjectPreset {
        name: "Bowling ball",
        mass: 7.2,
        diameter: 0.21,
        drag_coefficient: 0.4,
    },
];

pub fn find_preset(name: &str) -> Option<&'static ObjectPreset> {
    OBJECT_PRESETS.iter().find(|preset| preset.name == name)
}

pub fn default_preset() -> &'static ObjectPreset {
    &OBJECT_PRESETS[0]
}
