//! Simplified world coastlines as closed `[longitude, latitude]` rings (degrees).
//!
//! Precision is deliberately coarse: the dot field samples them at roughly
//! a quarter of a degree and only needs continents to read at a glance.

pub static WORLD_OUTLINES: &[&[[f64; 2]]] = &[
    // North America
    &[
        [-168.0, 72.0], [-160.0, 72.0], [-153.0, 70.0], [-145.0, 62.0], [-142.0, 58.0],
        [-135.0, 57.0], [-130.0, 55.0], [-125.0, 48.0], [-124.0, 46.0], [-124.0, 38.0],
        [-120.0, 34.0], [-117.0, 32.0], [-117.0, 29.0], [-110.0, 23.0], [-105.0, 20.0],
        [-97.0, 19.0], [-90.0, 20.0], [-83.0, 20.0], [-87.0, 15.0], [-85.0, 11.0], [-82.0, 8.0],
        [-77.0, 8.0], [-77.0, 12.0], [-83.0, 10.0], [-90.0, 16.0], [-92.0, 18.0], [-97.0, 22.0],
        [-98.0, 26.0], [-97.0, 28.0], [-94.0, 30.0], [-90.0, 29.0], [-89.0, 30.0],
        [-85.0, 30.0], [-82.0, 29.0], [-80.0, 25.0], [-80.0, 22.0], [-80.0, 25.0],
        [-75.0, 35.0], [-77.0, 40.0], [-74.0, 40.0], [-72.0, 41.0], [-70.0, 42.0],
        [-66.0, 44.0], [-67.0, 45.0], [-64.0, 47.0], [-61.0, 46.0], [-60.0, 46.0],
        [-63.0, 44.0], [-66.0, 43.0], [-67.0, 44.0], [-70.0, 47.0], [-75.0, 50.0],
        [-79.0, 52.0], [-83.0, 55.0], [-84.0, 57.0], [-82.0, 60.0], [-80.0, 63.0],
        [-83.0, 65.0], [-88.0, 65.0], [-92.0, 66.0], [-95.0, 68.0], [-100.0, 70.0],
        [-110.0, 70.0], [-120.0, 70.0], [-130.0, 70.0], [-140.0, 70.0], [-148.0, 70.0],
        [-155.0, 70.0], [-160.0, 68.0], [-165.0, 67.0], [-168.0, 66.0], [-168.0, 72.0],
    ],
    // Greenland
    &[
        [-18.0, 76.0], [-25.0, 78.0], [-33.0, 83.0], [-45.0, 84.0], [-60.0, 84.0],
        [-70.0, 82.0], [-70.0, 78.0], [-65.0, 72.0], [-52.0, 68.0], [-45.0, 60.0],
        [-42.0, 66.0], [-38.0, 68.0], [-28.0, 72.0], [-18.0, 76.0],
    ],
    // Central America
    &[
        [-90.0, 20.0], [-83.0, 20.0], [-87.0, 15.0], [-85.0, 11.0], [-83.0, 8.0], [-79.0, 8.0],
    ],
    // South America
    &[
        [-79.0, 8.0], [-75.0, 11.0], [-68.0, 11.0], [-62.0, 10.0], [-60.0, 8.0], [-53.0, 4.0],
        [-50.0, 2.0], [-50.0, 0.0], [-48.0, -1.0], [-45.0, -2.0], [-40.0, -2.0], [-36.0, -4.0],
        [-35.0, -9.0], [-37.0, -12.0], [-39.0, -16.0], [-39.0, -20.0], [-40.0, -22.0],
        [-43.0, -23.0], [-45.0, -24.0], [-48.0, -27.0], [-51.0, -32.0], [-55.0, -35.0],
        [-58.0, -38.0], [-62.0, -40.0], [-65.0, -42.0], [-68.0, -46.0], [-68.0, -54.0],
        [-72.0, -50.0], [-74.0, -42.0], [-73.0, -38.0], [-72.0, -30.0], [-70.0, -18.0],
        [-75.0, -14.0], [-77.0, -8.0], [-78.0, -2.0], [-80.0, 0.0], [-80.0, 5.0], [-78.0, 8.0],
        [-79.0, 8.0],
    ],
    // Europe
    &[
        [-10.0, 36.0], [-7.0, 38.0], [-9.0, 39.0], [-8.0, 44.0], [-3.0, 44.0], [0.0, 44.0],
        [1.0, 43.0], [3.0, 44.0], [5.0, 44.0], [6.0, 46.0], [7.0, 48.0], [6.0, 49.0],
        [7.0, 51.0], [6.0, 52.0], [7.0, 53.0], [8.0, 54.0], [9.0, 55.0], [10.0, 55.0],
        [12.0, 56.0], [14.0, 56.0], [15.0, 55.0], [18.0, 55.0], [19.0, 55.0], [20.0, 54.0],
        [21.0, 55.0], [22.0, 56.0], [23.0, 57.0], [23.0, 58.0], [24.0, 60.0], [25.0, 62.0],
        [28.0, 65.0], [29.0, 68.0], [28.0, 71.0], [26.0, 70.0], [23.0, 70.0], [19.0, 70.0],
        [18.0, 68.0], [17.0, 65.0], [14.0, 63.0], [5.0, 62.0], [5.0, 58.0], [1.0, 58.0],
        [-2.0, 57.0], [-5.0, 58.0], [-6.0, 55.0], [-8.0, 52.0], [-10.0, 52.0], [-9.0, 44.0],
        [-10.0, 36.0],
    ],
    // Scandinavia
    &[
        [5.0, 58.0], [8.0, 58.0], [10.0, 57.0], [12.0, 56.0], [14.0, 56.0], [14.0, 58.0],
        [12.0, 59.0], [12.0, 62.0], [14.0, 64.0], [16.0, 66.0], [18.0, 68.0], [20.0, 70.0],
        [22.0, 70.0], [25.0, 68.0], [26.0, 65.0], [24.0, 62.0], [22.0, 59.0], [18.0, 57.0],
        [14.0, 56.0], [12.0, 56.0], [10.0, 55.0], [8.0, 55.0], [5.0, 58.0],
    ],
    // Iceland
    &[
        [-24.0, 64.0], [-22.0, 66.0], [-18.0, 67.0], [-13.0, 66.0], [-13.0, 64.0],
        [-18.0, 63.0], [-22.0, 63.0], [-24.0, 64.0],
    ],
    // Great Britain
    &[
        [-6.0, 50.0], [-5.0, 50.0], [-3.0, 51.0], [0.0, 51.0], [1.0, 51.0], [2.0, 52.0],
        [1.0, 53.0], [-1.0, 54.0], [-2.0, 57.0], [-4.0, 58.0], [-6.0, 56.0], [-5.0, 54.0],
        [-4.0, 52.0], [-5.0, 51.0], [-6.0, 50.0],
    ],
    // Ireland
    &[
        [-10.0, 52.0], [-7.0, 52.0], [-6.0, 53.0], [-6.0, 55.0], [-8.0, 55.0], [-10.0, 54.0],
        [-10.0, 52.0],
    ],
    // Africa
    &[
        [-18.0, 15.0], [-16.0, 18.0], [-12.0, 22.0], [-12.0, 24.0], [-8.0, 28.0], [-5.0, 32.0],
        [-2.0, 35.0], [0.0, 36.0], [5.0, 37.0], [10.0, 37.0], [12.0, 34.0], [13.0, 33.0],
        [15.0, 32.0], [20.0, 32.0], [25.0, 30.0], [30.0, 28.0], [32.0, 28.0], [34.0, 28.0],
        [36.0, 24.0], [38.0, 22.0], [40.0, 16.0], [42.0, 12.0], [44.0, 10.0], [48.0, 8.0],
        [50.0, 5.0], [42.0, 0.0], [40.0, -8.0], [38.0, -12.0], [36.0, -18.0], [35.0, -22.0],
        [33.0, -26.0], [30.0, -30.0], [26.0, -34.0], [20.0, -35.0], [18.0, -34.0],
        [16.0, -32.0], [14.0, -22.0], [12.0, -16.0], [10.0, -6.0], [8.0, 4.0], [6.0, 5.0],
        [2.0, 6.0], [-2.0, 5.0], [-5.0, 5.0], [-8.0, 5.0], [-12.0, 6.0], [-15.0, 10.0],
        [-18.0, 14.0], [-18.0, 15.0],
    ],
    // Madagascar
    &[
        [44.0, -13.0], [47.0, -15.0], [49.0, -18.0], [49.0, -22.0], [48.0, -26.0],
        [46.0, -25.0], [43.0, -22.0], [43.0, -17.0], [44.0, -13.0],
    ],
    // Asia
    &[
        [26.0, 42.0], [30.0, 42.0], [35.0, 37.0], [37.0, 36.0], [38.0, 37.0], [42.0, 38.0],
        [45.0, 42.0], [48.0, 44.0], [52.0, 44.0], [56.0, 44.0], [60.0, 44.0], [64.0, 42.0],
        [68.0, 38.0], [70.0, 35.0], [72.0, 32.0], [74.0, 30.0], [76.0, 26.0], [78.0, 22.0],
        [80.0, 14.0], [80.0, 8.0], [78.0, 8.0], [76.0, 10.0], [72.0, 8.0], [70.0, 14.0],
        [68.0, 22.0], [66.0, 24.0], [64.0, 24.0], [62.0, 24.0], [60.0, 26.0], [58.0, 24.0],
        [60.0, 22.0], [62.0, 20.0], [66.0, 18.0], [68.0, 14.0], [72.0, 20.0], [76.0, 22.0],
        [80.0, 24.0], [82.0, 26.0], [84.0, 28.0], [86.0, 28.0], [88.0, 22.0], [90.0, 22.0],
        [92.0, 22.0], [94.0, 20.0], [98.0, 16.0], [100.0, 12.0], [102.0, 2.0], [104.0, 0.0],
        [102.0, 2.0], [100.0, 4.0], [100.0, 6.0], [100.0, 10.0], [102.0, 12.0], [104.0, 10.0],
        [106.0, 10.0], [108.0, 14.0], [110.0, 18.0], [112.0, 22.0], [114.0, 22.0],
        [116.0, 22.0], [118.0, 24.0], [120.0, 30.0], [122.0, 32.0], [120.0, 36.0],
        [122.0, 38.0], [124.0, 40.0], [126.0, 40.0], [128.0, 38.0], [128.0, 36.0],
        [130.0, 34.0], [132.0, 34.0], [134.0, 36.0], [138.0, 40.0], [140.0, 42.0],
        [142.0, 44.0], [145.0, 44.0], [144.0, 50.0], [140.0, 54.0], [135.0, 55.0],
        [130.0, 58.0], [120.0, 62.0], [112.0, 60.0], [100.0, 60.0], [90.0, 65.0], [80.0, 68.0],
        [74.0, 72.0], [68.0, 72.0], [64.0, 72.0], [60.0, 70.0], [55.0, 68.0], [50.0, 64.0],
        [48.0, 60.0], [44.0, 56.0], [40.0, 50.0], [36.0, 46.0], [32.0, 44.0], [28.0, 44.0],
        [26.0, 42.0],
    ],
    // Indian subcontinent
    &[
        [68.0, 22.0], [72.0, 22.0], [76.0, 10.0], [78.0, 8.0], [80.0, 8.0], [82.0, 10.0],
        [80.0, 14.0], [78.0, 22.0], [76.0, 26.0], [72.0, 32.0], [68.0, 30.0], [66.0, 24.0],
        [68.0, 22.0],
    ],
    // Sri Lanka
    &[
        [80.0, 6.0], [81.0, 8.0], [81.0, 10.0], [80.0, 10.0], [80.0, 6.0],
    ],
    // Japan (Honshu)
    &[
        [130.0, 31.0], [131.0, 33.0], [133.0, 34.0], [135.0, 34.0], [136.0, 36.0],
        [138.0, 38.0], [140.0, 40.0], [141.0, 42.0], [142.0, 44.0], [141.0, 43.0],
        [140.0, 42.0], [138.0, 38.0], [136.0, 34.0], [133.0, 32.0], [131.0, 31.0],
        [130.0, 31.0],
    ],
    // Hokkaido
    &[
        [140.0, 42.0], [142.0, 44.0], [144.0, 45.0], [142.0, 46.0], [140.0, 44.0],
        [140.0, 42.0],
    ],
    // Taiwan
    &[
        [120.0, 22.0], [121.0, 23.0], [121.0, 25.0], [120.0, 25.0], [120.0, 22.0],
    ],
    // Philippines (Luzon)
    &[
        [117.0, 14.0], [118.0, 16.0], [120.0, 18.0], [122.0, 18.0], [122.0, 16.0],
        [120.0, 14.0], [118.0, 12.0], [117.0, 14.0],
    ],
    // Borneo
    &[
        [108.0, 2.0], [110.0, 0.0], [112.0, -2.0], [115.0, -4.0], [117.0, -2.0], [118.0, 2.0],
        [117.0, 4.0], [115.0, 5.0], [112.0, 5.0], [110.0, 4.0], [108.0, 2.0],
    ],
    // Sumatra
    &[
        [95.0, -2.0], [98.0, 2.0], [102.0, 4.0], [105.0, 4.0], [106.0, 2.0], [104.0, 0.0],
        [102.0, -2.0], [98.0, -4.0], [95.0, -4.0], [95.0, -2.0],
    ],
    // Java
    &[
        [105.0, -6.0], [108.0, -7.0], [110.0, -8.0], [112.0, -8.0], [114.0, -8.0],
        [115.0, -8.0], [113.0, -8.0], [110.0, -8.0], [108.0, -7.0], [105.0, -6.0],
    ],
    // Sulawesi
    &[
        [120.0, -1.0], [122.0, 0.0], [124.0, -1.0], [122.0, -4.0], [120.0, -4.0], [118.0, -3.0],
        [120.0, -1.0],
    ],
    // New Guinea
    &[
        [132.0, -2.0], [135.0, -4.0], [138.0, -6.0], [140.0, -8.0], [142.0, -6.0],
        [145.0, -6.0], [147.0, -6.0], [146.0, -7.0], [142.0, -8.0], [138.0, -8.0],
        [136.0, -6.0], [134.0, -4.0], [132.0, -2.0],
    ],
    // Australia
    &[
        [114.0, -22.0], [115.0, -14.0], [120.0, -14.0], [122.0, -14.0], [128.0, -14.0],
        [130.0, -12.0], [132.0, -12.0], [136.0, -12.0], [138.0, -14.0], [140.0, -15.0],
        [142.0, -16.0], [145.0, -18.0], [148.0, -22.0], [150.0, -24.0], [152.0, -26.0],
        [153.0, -28.0], [152.0, -30.0], [150.0, -34.0], [148.0, -36.0], [146.0, -38.0],
        [144.0, -38.0], [140.0, -38.0], [136.0, -36.0], [132.0, -32.0], [128.0, -32.0],
        [124.0, -32.0], [120.0, -34.0], [116.0, -34.0], [114.0, -30.0], [114.0, -26.0],
        [114.0, -22.0],
    ],
    // Tasmania
    &[
        [144.0, -40.0], [146.0, -42.0], [148.0, -42.0], [147.0, -44.0], [145.0, -42.0],
        [144.0, -40.0],
    ],
    // New Zealand (North Island)
    &[
        [172.0, -38.0], [174.0, -38.0], [176.0, -38.0], [178.0, -38.0], [178.0, -42.0],
        [176.0, -43.0], [174.0, -40.0], [172.0, -38.0],
    ],
    // New Zealand (South Island)
    &[
        [168.0, -44.0], [170.0, -44.0], [172.0, -44.0], [174.0, -44.0], [172.0, -46.0],
        [170.0, -47.0], [168.0, -46.0], [168.0, -44.0],
    ],
    // Cuba
    &[
        [-85.0, 22.0], [-82.0, 22.0], [-80.0, 22.0], [-74.0, 20.0], [-74.0, 22.0],
        [-80.0, 24.0], [-84.0, 24.0], [-85.0, 22.0],
    ],
    // Hispaniola
    &[
        [-74.0, 18.0], [-72.0, 18.0], [-68.0, 18.0], [-68.0, 20.0], [-72.0, 20.0],
        [-74.0, 20.0], [-74.0, 18.0],
    ],
    // Cyprus
    &[
        [32.0, 34.0], [33.0, 35.0], [34.0, 35.0], [34.0, 34.0], [32.0, 34.0],
    ],
    // Crimea
    &[
        [32.0, 44.0], [34.0, 45.0], [36.0, 45.0], [36.0, 44.0], [32.0, 44.0],
    ],
];

#[cfg(test)]
mod tests {
    use super::WORLD_OUTLINES;

    #[test]
    fn outlines_are_in_range() {
        assert_eq!(WORLD_OUTLINES.len(), 31);
        for outline in WORLD_OUTLINES {
            assert!(outline.len() >= 3);
            for &[lng, lat] in outline.iter() {
                assert!((-180.0..=180.0).contains(&lng));
                assert!((-90.0..=90.0).contains(&lat));
            }
        }
    }
}
