mod cpal_capture;
