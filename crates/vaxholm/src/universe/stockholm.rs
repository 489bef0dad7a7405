//! Nasdaq OMX Stockholm universe tagged by market-cap segment.

use crate::universe::segment::MarketSegment;
use std::collections::{BTreeMap, HashSet};

/// Suffix Yahoo Finance appends to Stockholm listings.
pub const EXCHANGE_SUFFIX: &str = ".ST";

/// Stockholm constituent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constituent {
    /// Provider symbol, e.g. `VOLV-B.ST`.
    pub symbol: String,
    /// Company name.
    pub name: String,
    /// Market-cap segment.
    pub segment: MarketSegment,
}

impl Constituent {
    /// Create a new constituent.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, segment: MarketSegment) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            segment,
        }
    }
}

/// Nasdaq OMX Stockholm universe (Large, Mid and Small Cap).
///
/// Symbols are unique; when the source table lists a symbol twice the first
/// entry wins.
#[derive(Debug, Clone)]
pub struct StockholmUniverse {
    constituents: Vec<Constituent>,
}

impl StockholmUniverse {
    /// Create the universe with the default constituents.
    pub fn new() -> Self {
        Self::from_constituents(Self::default_constituents())
    }

    /// Build a universe from an explicit table, dropping repeated symbols.
    pub fn from_constituents(table: impl IntoIterator<Item = Constituent>) -> Self {
        let mut seen = HashSet::new();
        let constituents = table
            .into_iter()
            .filter(|c| seen.insert(c.symbol.clone()))
            .collect();
        Self { constituents }
    }

    /// Get all constituents in table order.
    pub fn constituents(&self) -> &[Constituent] {
        &self.constituents
    }

    /// Get all symbols in table order.
    pub fn symbols(&self) -> Vec<String> {
        self.constituents.iter().map(|c| c.symbol.clone()).collect()
    }

    /// Get the segment of a symbol.
    pub fn segment(&self, symbol: &str) -> Option<MarketSegment> {
        self.constituents
            .iter()
            .find(|c| c.symbol == symbol)
            .map(|c| c.segment)
    }

    /// Get all symbols in a segment, in table order.
    pub fn symbols_in_segment(&self, segment: MarketSegment) -> Vec<String> {
        self.constituents
            .iter()
            .filter(|c| c.segment == segment)
            .map(|c| c.symbol.clone())
            .collect()
    }

    /// Restrict the universe to one segment; `None` keeps everything.
    pub fn restrict(&self, segment: Option<MarketSegment>) -> Self {
        match segment {
            Some(segment) => Self {
                constituents: self
                    .constituents
                    .iter()
                    .filter(|c| c.segment == segment)
                    .cloned()
                    .collect(),
            },
            None => self.clone(),
        }
    }

    /// Get the count of constituents per segment.
    pub fn segment_counts(&self) -> BTreeMap<MarketSegment, usize> {
        let mut counts = BTreeMap::new();
        for constituent in &self.constituents {
            *counts.entry(constituent.segment).or_insert(0) += 1;
        }
        counts
    }

    fn default_constituents() -> Vec<Constituent> {
        use MarketSegment::{LargeCap, MidCap, SmallCap};

        let table: &[(&str, &str, MarketSegment)] = &[
        // Large Cap
        ("ABB.ST", "ABB Ltd", LargeCap),
        ("ALFA.ST", "Alfa Laval", LargeCap),
        ("ASSA-B.ST", "Assa Abloy B", LargeCap),
        ("ATCO-A.ST", "Atlas Copco A", LargeCap),
        ("ATCO-B.ST", "Atlas Copco B", LargeCap),
        ("AZN.ST", "AstraZeneca", LargeCap),
        ("BOL.ST", "Boliden", LargeCap),
        ("ERIC-B.ST", "Ericsson B", LargeCap),
        ("ESSITY-B.ST", "Essity B", LargeCap),
        ("EVO.ST", "Evolution Gaming", LargeCap),
        ("EQT.ST", "EQT AB", LargeCap),
        ("GETI-B.ST", "Getinge B", LargeCap),
        ("HM-B.ST", "H&M B", LargeCap),
        ("HEXA-B.ST", "Hexagon B", LargeCap),
        ("INDU-C.ST", "Industrivärden C", LargeCap),
        ("INVE-B.ST", "Investor B", LargeCap),
        ("KINV-B.ST", "Kinnevik B", LargeCap),
        ("LATO-B.ST", "Latour B", LargeCap),
        ("NDA-SE.ST", "Nordea Bank", LargeCap),
        ("NIBE-B.ST", "NIBE Industrier B", LargeCap),
        ("SAND.ST", "Sandvik", LargeCap),
        ("SCA-B.ST", "SCA B", LargeCap),
        ("SEB-A.ST", "SEB A", LargeCap),
        ("SHB-A.ST", "Handelsbanken A", LargeCap),
        ("SKF-B.ST", "SKF B", LargeCap),
        ("SWED-A.ST", "Swedbank A", LargeCap),
        ("TELIA.ST", "Telia Company", LargeCap),
        ("VOLV-B.ST", "Volvo B", LargeCap),
        ("SAAB-B.ST", "Saab B", LargeCap),
        ("ELUX-B.ST", "Electrolux B", LargeCap),
        ("SSAB-A.ST", "SSAB A", LargeCap),
        ("SSAB-B.ST", "SSAB B", LargeCap),
        ("ALIV-SDB.ST", "Aliv SDB", LargeCap),
        ("EMBRAC-B.ST", "Embracer Group B", LargeCap),

        // Mid Cap
        ("AAK.ST", "AAK AB", MidCap),
        ("BALD-B.ST", "Balders B", MidCap),
        ("BEIA-B.ST", "Beijer Alma B", MidCap),
        ("BEIJ-B.ST", "Beijer Ref B", MidCap),
        ("BUFAB.ST", "Bufab", MidCap),
        ("CAST.ST", "Castellum", MidCap),
        ("CLAS-B.ST", "Clas Ohlson B", MidCap),
        ("COOR.ST", "Coor Service", MidCap),
        ("DIOS.ST", "Diös Fastigheter", MidCap),
        ("DUNI.ST", "Duni AB", MidCap),
        ("EKTA-B.ST", "Elekta B", MidCap),
        ("FABG.ST", "Fabege", MidCap),
        ("GARO.ST", "Garo AB", MidCap),
        ("HOLM-B.ST", "Holmen B", MidCap),
        ("HUFV-A.ST", "Hufvudstaden A", MidCap),
        ("HUSQ-B.ST", "Husqvarna B", MidCap),
        ("ICA.ST", "ICA Gruppen", MidCap),
        ("INTRUM.ST", "Intrum", MidCap),
        ("JM.ST", "JM AB", MidCap),
        ("LIFCO-B.ST", "Lifco B", MidCap),
        ("LUND-B.ST", "Lundbergföretagen B", MidCap),
        ("NENT-B.ST", "NENT Group B", MidCap),
        ("NOLA-B.ST", "Nolato B", MidCap),
        ("NOTE.ST", "NOTE AB", MidCap),
        ("PEAB-B.ST", "Peab B", MidCap),
        ("PNDX-B.ST", "Pandox B", MidCap),
        ("PRIC-B.ST", "Pricer B", MidCap),
        ("SAGAX-B.ST", "Sagax B", MidCap),
        ("SECU-B.ST", "Securitas B", MidCap),
        ("SKISTAR-B.ST", "SkiStar B", MidCap),
        ("SWEC-B.ST", "Sweco B", MidCap),
        ("SYSR.ST", "Systemair", MidCap),
        ("THULE.ST", "Thule Group", MidCap),
        ("TREL-B.ST", "Trelleborg B", MidCap),
        ("VBG-B.ST", "VBG Group B", MidCap),
        ("VITR.ST", "Vitrolife", MidCap),
        ("WALL-B.ST", "Wallenstam B", MidCap),
        ("WIHL.ST", "Wihlborgs", MidCap),
        ("XANO-B.ST", "Xano Industri B", MidCap),
        ("BURE.ST", "Bure Equity", MidCap),
        ("CATE.ST", "Catena", MidCap),
        ("ENEA.ST", "Enea AB", MidCap),
        ("HEXPOL-B.ST", "Hexpol B", MidCap),
        ("NEWA-B.ST", "New Wave B", MidCap),
        ("NP3.ST", "NP3 Fastigheter", MidCap),
        ("TROAX.ST", "Troax Group", MidCap),
        ("BRG-B.ST", "Bergman & Beving B", MidCap),
        ("DORO.ST", "Doro AB", MidCap),
        ("KABE-B.ST", "Kabe Group B", MidCap),
        ("MEKO.ST", "Mekonomen", MidCap),
        ("OEM-B.ST", "OEM International B", MidCap),
        ("RATO-B.ST", "Ratos B", MidCap),
        ("SCST.ST", "Scandi Standard", MidCap),
        ("SDIP-B.ST", "Sdiptech B", MidCap),

        // Small Cap
        ("ADDV-B.ST", "Addvise Group B", SmallCap),
        ("ALLIGO-B.ST", "Alligo B", SmallCap),
        ("AMBEA.ST", "Ambea AB", SmallCap),
        ("ARJO-B.ST", "Arjo B", SmallCap),
        ("AXFO.ST", "Axfood", SmallCap),
        ("BEWI.ST", "BEWi ASA", SmallCap),
        ("BOOL.ST", "Boolean", SmallCap),
        ("BRAV.ST", "Bravida Holding", SmallCap),
        ("CDON.ST", "CDON AB", SmallCap),
        ("CRED-A.ST", "Creades A", SmallCap),
        ("ELAN-B.ST", "Elanders B", SmallCap),
        ("ELTEL.ST", "Eltel AB", SmallCap),
        ("EWRK.ST", "eWork Group", SmallCap),
        ("FING-B.ST", "Fingerprint Cards B", SmallCap),
        ("HANSA.ST", "Hansa Biopharma", SmallCap),
        ("HEBA-B.ST", "Heba Fastighets B", SmallCap),
        ("HTRO.ST", "Hoist Finance", SmallCap),
        ("INDT.ST", "Indutrade", SmallCap),
        ("ITAB.ST", "ITAB Shop Concept", SmallCap),
        ("KNOW-IT.ST", "Know IT", SmallCap),
        ("LAMM-B.ST", "Lammhults Design B", SmallCap),
        ("MIPS.ST", "MIPS AB", SmallCap),
        ("MSAB-B.ST", "MSAB B", SmallCap),
        ("NAXS.ST", "NAXS Nordic", SmallCap),
        ("NEWA-A.ST", "New Wave A", SmallCap),
        ("NOLA-A.ST", "Nolato A", SmallCap),
        ("ONCO.ST", "Oncopeptides", SmallCap),
        ("OREX.ST", "Orexo AB", SmallCap),
        ("PLAZ-B.ST", "Platzer Fastigheter B", SmallCap),
        ("PNDX-A.ST", "Pandox A", SmallCap),
        ("PROB.ST", "Probi AB", SmallCap),
        ("PROF-B.ST", "Profilgruppen B", SmallCap),
        ("RAIL.ST", "Railcare Group", SmallCap),
        ("SAGA-A.ST", "Sagax A", SmallCap),
        ("SENS.ST", "Sensys Gatso Group", SmallCap),
        ("SIVERS.ST", "Sivers Semiconductors", SmallCap),
        ("SOBI.ST", "Swedish Orphan Biovitrum", SmallCap),
        ("SOLT.ST", "Soltech Energy Sweden", SmallCap),
        ("SSM.ST", "SSM Holding", SmallCap),
        ("TRAD.ST", "Tradedoubler", SmallCap),
        ("VEFAB.ST", "VEF AB", SmallCap),
        ("VIGS.ST", "Vigs", SmallCap),
        ("VPLAY-B.ST", "Viaplay B", SmallCap),
        ("WISE.ST", "Wise Group", SmallCap),
        ("YUBICO.ST", "Yubico AB", SmallCap),
        ("NTEK.ST", "Nordic Tech", SmallCap),
        ("FPAR-A.ST", "Fastpartner A", SmallCap),
        ("LOGI-B.ST", "Logistea B", SmallCap),
        ("FLAT-B.ST", "Flat Capital B", SmallCap),
        ("PRIC-A.ST", "Pricer A", SmallCap),
        ("SKIS-B.ST", "Skistar B", SmallCap),
        ];

        table
            .iter()
            .map(|&(symbol, name, segment)| Constituent::new(symbol, name, segment))
            .collect()
    }
}

impl Default for StockholmUniverse {
    fn default() -> Self {
        Self::new()
    }
}
