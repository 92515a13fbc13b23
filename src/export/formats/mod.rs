pub mod multiqc;
