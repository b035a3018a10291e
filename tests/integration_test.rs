// Copyright (c) 2024 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

// extern crate we're testing, same as any other code would do.
extern crate geodensify;

use csv::ReaderBuilder;
use geodensify::angle::delta_longitude;
use geodensify::model::LatLonVincenty;
use geodensify::{Degrees, LatLon, Metres, Validate};
use std::env;
use std::path::Path;

#[test]
#[ignore]
fn test_vincenty_geodtest_examples() {
    // Read GEODTEST_DIR/GeodTest.dat file and run tests
    let filename = "GeodTest.dat";
    let dir_key = "GEODTEST_DIR";

    let p = env::var(dir_key).expect("Environment variable not found: GEODTEST_DIR");
    let path = Path::new(&p);
    let file_path = path.join(filename);
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .from_path(file_path)
        .expect("Could not read file: GeodTest.dat");
    let mut line_number = 1;
    let mut unconverged = 0;
    for result in csv_reader.records() {
        let record = result.unwrap();

        let lat1 = record[0].parse::<f64>().unwrap();
        let lon1 = record[1].parse::<f64>().unwrap();
        let azi1 = Degrees(record[2].parse::<f64>().unwrap());
        let lat2 = record[3].parse::<f64>().unwrap();
        let lon2 = record[4].parse::<f64>().unwrap();
        let d_metres = Metres(record[6].parse::<f64>().unwrap());

        //  random_df = tests_df[:100000]
        //  antipodal_df = tests_df[100000:150000]
        //  short_df = tests_df[150000:200000]
        let is_antipodal = (100_000 < line_number) && (line_number <= 150_000);

        let a = LatLonVincenty::from_degrees(lat1, lon1);
        let b = LatLon::from_degrees(lat2, lon2);
        let (distance, azimuth, _) = a.inverse(&b);
        if !distance.0.is_nan() {
            let delta_length_m = libm::fabs(d_metres.0 - distance.0);
            let max_delta_m = if is_antipodal { 1.0e-2 } else { 1.0e-3 };
            if max_delta_m < delta_length_m {
                panic!(
                    "length, line: {:?} delta: {:?} length: {:?} result: {:?} ",
                    line_number, delta_length_m, d_metres, distance
                );
            }

            let delta_azimuth = libm::fabs(delta_longitude(Degrees(azi1.0 - azimuth.0)).0);
            if !is_antipodal && 5.5e-5 < delta_azimuth {
                panic!(
                    "azimuth, line: {:?} delta: {:?} azimuth: {:?} result: {:?} ",
                    line_number, delta_azimuth, azi1, azimuth
                );
            }
        } else {
            unconverged += 1;
        }

        let (end, _) = a.direct(d_metres, azi1);
        assert!(end.is_valid(), "direct, line: {line_number}");
        let delta_lat = libm::fabs(lat2 - end.lat.0);
        if 1.0e-8 < delta_lat {
            panic!(
                "direct, line: {:?} delta: {:?} latitude: {:?} result: {:?} ",
                line_number, delta_lat, lat2, end
            );
        }

        line_number += 1;
        if 200000 < line_number {
            break;
        }
    }

    println!("Vincenty inverse failed to converge: {unconverged}");
}
