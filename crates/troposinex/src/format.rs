//! Fixed TROPOSINEX text layout.
//!
//! The block constants reproduce the exchange layout byte for byte,
//! including tab separators and trailing spaces. Do not reflow them.

use nwp_common::TroEpoch;

pub(crate) const HEADER: &str = "%=TRO \n\
\n\
*---------------------------------------------------------------------------- \n\
+FILE/REFERENCE \n\
*INFO_TYPE_____ \n\
INFO______________________________ \n\
DESCRIPTION\t\tSUGAC \n\
OUTPUT\t\t\tSUGAC \n\
CONTACT\t\t\tGUEROVA \n\
SOFTWARE\t\tWRFv3.7.1 \n\
INPUT\t\t\tNWM \n\
VERSION NUMBER\t\t001 \n\
-FILE/REFERENCE \n\
\n\
*---------------------------------------------------------------------------- \n\
+TROP/DESCRIPTION \n\
*_____KEYWORD_______\n\
__VALUE(S)________________\n\
REFRACTIVITY COEFFICIENTS \t77.60 70.40 373900.0\n\
TROPO SAMPLING INTERVAL \t3600\n\
TIME SYSTEM \t\t\tUTC\n\
TROPO PARAMETER NAMES\t\tIWV PRESS HUMSPC TEMDRY WMTEMP TRODRY TROTOT TROWET\n\
TROPO PARAMETER UNITS\t\t1 1 1 1 1 1e+03 1e+03 1e+03\n\
TROPO PARAMETER WIDTH\t\t6 6 7 6 6 6 6 6 6\n\
-TROP/DESCRIPTION \n\
\n\
*---------------------------------------------------------------------------- \n\
+SITE/ID \n\
*STATION__ _LONGITUDE _LATITUDE_ _HGT_MSL_ ";

pub(crate) const SOLUTION_BLOCK: &str = " \n \n\
-SITE/ID \n\
\n\
*---------------------------------------------------------------------------- \n\
+SITE/COORDINATES \n\
*STATION \n\
\n\
-SITE/COORDINATES \n\
\n\
*---------------------------------------------------------------------------- \n\
+TROP/SOLUTION \n\
*STATION__ ____EPOCH___ IWV PRESS HUMSPC TEMPDRY WMTEMP TRODRY TROTOT TROWET ";

pub(crate) const TRAILER: &str = " \n \n\
-TROP/SOLUTION \n\
\n\
%=ENDTRO \n";

/// One accumulated station row.
#[derive(Debug, Clone, PartialEq)]
pub struct TroRow {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
    pub iwv_kg_m2: f64,
    pub pressure_hpa: f64,
    pub specific_humidity_g_kg: f64,
    pub temperature_k: f64,
    pub mean_temperature_k: f64,
    pub zhd_mm: f64,
    pub ztd_mm: f64,
    pub zwd_mm: f64,
    pub epoch: TroEpoch,
}

/// Output filename for a batch, stamped from the epoch of its last row.
pub fn filename(epoch: TroEpoch) -> String {
    format!("SUG1_UNK_UNK_{}_00U_00U.TRO", epoch.file_stamp())
}

/// Render a complete TROPOSINEX document for one time step.
pub fn render(rows: &[TroRow]) -> String {
    let mut out = String::from(HEADER);

    for row in rows {
        out.push_str(&format!(
            "\n{:<12} {:.6} {:.6} {:.6}",
            truncate(&row.name, 12),
            row.longitude,
            row.latitude,
            row.altitude
        ));
    }

    out.push_str(SOLUTION_BLOCK);

    for row in rows {
        out.push_str(&format!(
            "\n {:<9} {:<12} {:5.2} {:5.2} {:5.3} {:5.1} {:5.1} {:5.1} {:5.1} {:5.1}",
            truncate(&row.name, 9),
            row.epoch.epoch_string(),
            row.iwv_kg_m2,
            row.pressure_hpa,
            row.specific_humidity_g_kg,
            row.temperature_k,
            row.mean_temperature_k,
            row.zhd_mm,
            row.ztd_mm,
            row.zwd_mm
        ));
    }

    out.push_str(TRAILER);
    out
}

fn truncate(name: &str, max: usize) -> &str {
    match name.char_indices().nth(max) {
        Some((idx, _)) => &name[..idx],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(name: &str) -> TroRow {
        let epoch =
            TroEpoch::from_datetime(Utc.with_ymd_and_hms(2019, 1, 15, 12, 0, 0).unwrap());
        TroRow {
            name: name.to_string(),
            longitude: 23.394700,
            latitude: 42.556100,
            altitude: 1119.500000,
            iwv_kg_m2: 9.92,
            pressure_hpa: 1000.0,
            specific_humidity_g_kg: 9.0,
            temperature_k: 287.0,
            mean_temperature_k: 276.84,
            zhd_mm: 2271.1,
            ztd_mm: 2332.8,
            zwd_mm: 61.7,
            epoch,
        }
    }

    #[test]
    fn test_filename_from_epoch() {
        let epoch =
            TroEpoch::from_datetime(Utc.with_ymd_and_hms(2019, 1, 15, 12, 30, 0).unwrap());
        assert_eq!(filename(epoch), "SUG1_UNK_UNK_20190151230_00U_00U.TRO");
    }

    #[test]
    fn test_site_rows_truncate_to_twelve_chars() {
        let rendered = render(&[row("VERYLONGSTATIONNAME")]);
        assert!(rendered.contains("\nVERYLONGSTAT 23.394700 42.556100 1119.500000"));
    }

    #[test]
    fn test_solution_rows_truncate_to_nine_chars() {
        let rendered = render(&[row("VERYLONGSTATIONNAME")]);
        assert!(rendered.contains("\n VERYLONGS 2019:015:43200"));
    }

    #[test]
    fn test_header_and_trailer_markers() {
        let rendered = render(&[row("SOFI")]);
        assert!(rendered.starts_with("%=TRO \n\n*-"));
        assert!(rendered.ends_with("%=ENDTRO \n"));
        assert!(rendered.contains("+TROP/SOLUTION \n"));
        assert!(rendered.contains("DESCRIPTION\t\tSUGAC \n"));
    }

    #[test]
    fn test_two_station_document_is_byte_exact() {
        let sofi = row("SOFI");
        let mut plov = row("PLOVDIV");
        plov.longitude = 24.75;
        plov.latitude = 42.15;
        plov.altitude = 164.0;
        plov.iwv_kg_m2 = 12.5;
        plov.pressure_hpa = 995.25;
        plov.specific_humidity_g_kg = 10.125;
        plov.temperature_k = 290.3;
        plov.mean_temperature_k = 279.1;
        plov.zhd_mm = 2260.4;
        plov.ztd_mm = 2329.9;
        plov.zwd_mm = 69.5;

        let expected = "%=TRO \n\
\n\
*---------------------------------------------------------------------------- \n\
+FILE/REFERENCE \n\
*INFO_TYPE_____ \n\
INFO______________________________ \n\
DESCRIPTION\t\tSUGAC \n\
OUTPUT\t\t\tSUGAC \n\
CONTACT\t\t\tGUEROVA \n\
SOFTWARE\t\tWRFv3.7.1 \n\
INPUT\t\t\tNWM \n\
VERSION NUMBER\t\t001 \n\
-FILE/REFERENCE \n\
\n\
*---------------------------------------------------------------------------- \n\
+TROP/DESCRIPTION \n\
*_____KEYWORD_______\n\
__VALUE(S)________________\n\
REFRACTIVITY COEFFICIENTS \t77.60 70.40 373900.0\n\
TROPO SAMPLING INTERVAL \t3600\n\
TIME SYSTEM \t\t\tUTC\n\
TROPO PARAMETER NAMES\t\tIWV PRESS HUMSPC TEMDRY WMTEMP TRODRY TROTOT TROWET\n\
TROPO PARAMETER UNITS\t\t1 1 1 1 1 1e+03 1e+03 1e+03\n\
TROPO PARAMETER WIDTH\t\t6 6 7 6 6 6 6 6 6\n\
-TROP/DESCRIPTION \n\
\n\
*---------------------------------------------------------------------------- \n\
+SITE/ID \n\
*STATION__ _LONGITUDE _LATITUDE_ _HGT_MSL_ \n\
SOFI         23.394700 42.556100 1119.500000\n\
PLOVDIV      24.750000 42.150000 164.000000 \n \n\
-SITE/ID \n\
\n\
*---------------------------------------------------------------------------- \n\
+SITE/COORDINATES \n\
*STATION \n\
\n\
-SITE/COORDINATES \n\
\n\
*---------------------------------------------------------------------------- \n\
+TROP/SOLUTION \n\
*STATION__ ____EPOCH___ IWV PRESS HUMSPC TEMPDRY WMTEMP TRODRY TROTOT TROWET \n\
 SOFI      2019:015:43200  9.92 1000.00 9.000 287.0 276.8 2271.1 2332.8  61.7\n\
 PLOVDIV   2019:015:43200 12.50 995.25 10.125 290.3 279.1 2260.4 2329.9  69.5 \n \n\
-TROP/SOLUTION \n\
\n\
%=ENDTRO \n";

        assert_eq!(render(&[sofi, plov]), expected);
    }

    #[test]
    fn test_solution_row_layout() {
        let rendered = render(&[row("SOFI")]);
        // Name padded to 9, epoch padded to 12, fixed decimal widths
        assert!(rendered.contains(
            "\n SOFI      2019:015:43200  9.92 1000.00 9.000 287.0 276.8 2271.1 2332.8  61.7"
        ));
    }
}
